//! Global branding shared by every section of the editor.

use pagecraft_common::BrandingSource;
use pagecraft_content::GlobalBranding;
use std::sync::Arc;

use crate::EditorError;

/// Holds the current branding and writes changes through its source
///
/// Readers take a cheap [`snapshot`](BrandingManager::snapshot); an update
/// swaps the whole value so a snapshot never observes a half-applied change.
pub struct BrandingManager {
    source: Arc<dyn BrandingSource>,
    current: Arc<GlobalBranding>,
}

impl BrandingManager {
    /// Load branding, falling back to the built-in defaults when unavailable
    pub async fn load(source: Arc<dyn BrandingSource>) -> Self {
        let current = match source.load_branding().await {
            Ok(branding) => match branding.validate() {
                Ok(()) => branding,
                Err(e) => {
                    tracing::warn!(error = %e, "stored branding is invalid, using defaults");
                    GlobalBranding::default()
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "branding unavailable, using defaults");
                GlobalBranding::default()
            }
        };

        Self {
            source,
            current: Arc::new(current),
        }
    }

    pub fn snapshot(&self) -> Arc<GlobalBranding> {
        Arc::clone(&self.current)
    }

    /// Validate and persist `branding`, then make it current
    pub async fn update(&mut self, branding: GlobalBranding) -> Result<Arc<GlobalBranding>, EditorError> {
        branding.validate()?;
        if !self.source.save_branding(&branding).await? {
            return Err(EditorError::NotAcknowledged("save branding"));
        }
        tracing::info!("global branding updated");
        self.current = Arc::new(branding);
        Ok(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_common::MemoryBranding;

    #[tokio::test]
    async fn test_load_falls_back_to_defaults() {
        let source = Arc::new(MemoryBranding::default());
        let manager = BrandingManager::load(source).await;
        assert_eq!(*manager.snapshot(), GlobalBranding::default());
    }

    #[tokio::test]
    async fn test_update_validates_before_saving() {
        let source = Arc::new(MemoryBranding::new(GlobalBranding::default()));
        let mut manager = BrandingManager::load(source.clone()).await;

        let bad = GlobalBranding {
            primary_color: "blue".to_string(),
            ..GlobalBranding::default()
        };
        assert!(manager.update(bad).await.is_err());
        assert_eq!(source.stored(), Some(GlobalBranding::default()));

        let good = GlobalBranding {
            primary_color: "#ff0000".to_string(),
            ..GlobalBranding::default()
        };
        let before = manager.snapshot();
        manager.update(good.clone()).await.unwrap();
        assert_eq!(*manager.snapshot(), good);
        assert_eq!(*before, GlobalBranding::default());
        assert_eq!(source.stored(), Some(good));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_current() {
        let source = Arc::new(MemoryBranding::new(GlobalBranding::default()));
        let mut manager = BrandingManager::load(source.clone()).await;
        source.set_failing(true);

        let next = GlobalBranding {
            heading_weight: 800,
            ..GlobalBranding::default()
        };
        assert!(matches!(manager.update(next).await, Err(EditorError::Store(_))));
        assert_eq!(manager.snapshot().heading_weight, 700);
    }
}
