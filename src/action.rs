//! Callbacks attached to shortcuts and palette commands.
//!
//! An action takes no arguments and reports failure through `anyhow`. The
//! dispatcher and the palette controller never inspect a successful result;
//! an `Err` is handed back unchanged to whoever fed the input event in.
use std::sync::Arc;

/// Zero-argument, side-effecting callback.
pub type Action = Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

/// Wrap a closure as an [`Action`].
pub fn action<F>(f: F) -> Action
where
    F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// An action that does nothing.
///
/// Used for the reserved help/search shortcuts, whose behavior is built into
/// the dispatcher.
pub fn noop() -> Action {
    Arc::new(|| Ok(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_action_invokes_closure() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let act = action(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        act().unwrap();
        act().unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_action_error_is_returned() {
        let act = action(|| anyhow::bail!("backend unavailable"));
        let err = act().unwrap_err();
        assert_eq!(err.to_string(), "backend unavailable");
    }

    #[test]
    fn test_noop_succeeds() {
        assert!(noop()().is_ok());
    }
}
