//! Credential Broker
//!
//! Mints a short-lived key for the App Engine default service account, lends
//! it to a single action and revokes it afterwards.
//!
//! Revocation is issued exactly once per created key: after the action
//! settles, or from [`KeyLease`]'s `Drop` if the action panics or its future
//! is dropped before completing.

use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

use crate::repository::KeyRepository;
use crate::service::error::DeployError;

/// Ownership of a created key until it is revoked
pub struct KeyLease {
    keys: Arc<dyn KeyRepository>,
    name: Option<String>,
}

impl KeyLease {
    pub fn new(keys: Arc<dyn KeyRepository>, name: String) -> Self {
        Self {
            keys,
            name: Some(name),
        }
    }

    /// Revoke the key now and wait for the call to finish
    ///
    /// A failed revoke is logged, never returned.
    pub async fn release(mut self) {
        if let Some(name) = self.name.take() {
            revoke(self.keys.as_ref(), &name).await;
        }
    }
}

impl Drop for KeyLease {
    fn drop(&mut self) {
        let Some(name) = self.name.take() else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let keys = Arc::clone(&self.keys);
                handle.spawn(async move {
                    revoke(keys.as_ref(), &name).await;
                });
            }
            Err(_) => warn!("Key {} dropped outside a runtime and was not revoked", name),
        }
    }
}

async fn revoke(keys: &dyn KeyRepository, name: &str) {
    match keys.revoke_key(name).await {
        Ok(()) => info!("Revoked service account key {}", name),
        Err(e) => warn!("Failed to revoke service account key {}: {}", name, e),
    }
}

/// Run `action` with freshly minted key material
///
/// Key creation failure is fatal and `action` is not invoked. Otherwise the
/// action's result is returned unchanged once the key has been revoked.
pub async fn with_scoped_key<F, Fut, T>(
    keys: &Arc<dyn KeyRepository>,
    action: F,
) -> Result<T, DeployError>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<T, DeployError>>,
{
    let project_id = keys.project_id().await.map_err(DeployError::Credential)?;
    let key = keys
        .create_app_engine_key(&project_id)
        .await
        .map_err(DeployError::Credential)?;

    info!("Created service account key {}", key.name);

    let lease = KeyLease::new(Arc::clone(keys), key.name);
    let result = action(key.material).await;
    lease.release().await;

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fake::FakeKeys;
    use std::sync::atomic::Ordering;

    fn keys(fake: FakeKeys) -> (Arc<FakeKeys>, Arc<dyn KeyRepository>) {
        let fake = Arc::new(fake);
        let dyn_keys: Arc<dyn KeyRepository> = fake.clone();
        (fake, dyn_keys)
    }

    #[tokio::test]
    async fn test_revokes_after_success() {
        let (fake, keys) = keys(FakeKeys::new("bvdp-saturn-prod"));

        let material = with_scoped_key(&keys, |material| async move { Ok(material) })
            .await
            .unwrap();

        assert_eq!(material, "{\"key\":1}");
        assert_eq!(fake.created.load(Ordering::SeqCst), 1);
        assert_eq!(
            fake.revoked(),
            vec!["projects/bvdp-saturn-prod/serviceAccounts/sa/keys/1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_revokes_after_failure() {
        let (fake, keys) = keys(FakeKeys::new("p"));

        let err = with_scoped_key(&keys, |_| async {
            Err::<(), _>(DeployError::Timeout { build_num: 3 })
        })
        .await
        .unwrap_err();

        assert!(matches!(err, DeployError::Timeout { build_num: 3 }));
        assert_eq!(fake.revoked().len(), 1);
    }

    #[tokio::test]
    async fn test_revoke_failure_does_not_mask_result() {
        let (fake, keys) = keys(FakeKeys::new("p").failing_revoke());

        let value = with_scoped_key(&keys, |_| async { Ok(7) }).await.unwrap();

        assert_eq!(value, 7);
        assert_eq!(fake.revoked().len(), 1);
    }

    #[tokio::test]
    async fn test_create_failure_skips_action() {
        let (fake, keys) = keys(FakeKeys::new("p").failing_create());
        let mut invoked = false;

        let err = with_scoped_key(&keys, |_| {
            invoked = true;
            async { Ok(()) }
        })
        .await
        .unwrap_err();

        assert!(matches!(err, DeployError::Credential(_)));
        assert!(!invoked);
        assert!(fake.revoked().is_empty());
    }

    #[tokio::test]
    async fn test_panicking_action_revokes_once() {
        let (fake, keys) = keys(FakeKeys::new("p"));

        let task = tokio::spawn(async move {
            with_scoped_key(&keys, |_| -> std::future::Ready<Result<(), DeployError>> {
                panic!("action blew up before returning a future")
            })
            .await
        });
        assert!(task.await.unwrap_err().is_panic());

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(fake.created.load(Ordering::SeqCst), 1);
        assert_eq!(
            fake.revoked(),
            vec!["projects/p/serviceAccounts/sa/keys/1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_dropped_lease_revokes_once() {
        let (fake, keys) = keys(FakeKeys::new("p"));

        let lease = KeyLease::new(keys, "projects/p/serviceAccounts/sa/keys/9".to_string());
        drop(lease);

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(
            fake.revoked(),
            vec!["projects/p/serviceAccounts/sa/keys/9".to_string()]
        );
    }

    #[tokio::test]
    async fn test_released_lease_does_not_revoke_again() {
        let (fake, keys) = keys(FakeKeys::new("p"));

        KeyLease::new(keys, "k".to_string()).release().await;

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(fake.revoked(), vec!["k".to_string()]);
    }

    #[tokio::test]
    async fn test_cancelled_action_still_revokes() {
        let (fake, keys) = keys(FakeKeys::new("p"));

        let pending = with_scoped_key(&keys, |_| std::future::pending::<Result<(), DeployError>>());
        let timed_out =
            tokio::time::timeout(std::time::Duration::from_millis(10), pending).await;
        assert!(timed_out.is_err());

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(fake.created.load(Ordering::SeqCst), 1);
        assert_eq!(fake.revoked().len(), 1);
    }
}
