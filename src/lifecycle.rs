//! Binding a notification to the settlement of an async operation.
//!
//! A `loading` notification is shown while the operation runs. Once it
//! settles the loading notification starts exiting and, one exit delay
//! later, a new `success` or `error` notification takes its place. The
//! operation's own result is handed back untouched.

use crate::core::{PromiseMessages, ToastOptions, Variant};
use crate::registry::Registry;
use std::future::Future;
use tracing::{debug, trace};

impl Registry {
    /// Show `messages.loading` until `operation` settles, then the
    /// success or error text.
    ///
    /// The follow-up notification is scheduled, not awaited: this returns
    /// as soon as the operation settles. `Err` values are returned
    /// unchanged; the error text is whatever the caller put in `messages`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use toastline::core::{PromiseMessages, ToastOptions, Variant};
    /// use toastline::scheduler::ManualScheduler;
    /// use toastline::Registry;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let clock = ManualScheduler::new();
    /// let registry = Registry::with_scheduler(clock.clone());
    ///
    /// let value = registry
    ///     .promise(
    ///         async { Ok::<_, std::io::Error>(42) },
    ///         PromiseMessages::new("Saving", "Saved", "Save failed"),
    ///         ToastOptions::new(),
    ///     )
    ///     .await
    ///     .unwrap();
    /// assert_eq!(value, 42);
    ///
    /// clock.advance(Duration::from_millis(150));
    /// let snapshot = registry.snapshot();
    /// assert!(snapshot.iter().any(|n| n.variant == Variant::Success && n.message == "Saved"));
    /// # }
    /// ```
    pub async fn promise<T, E, F>(
        &self,
        operation: F,
        messages: PromiseMessages,
        options: ToastOptions,
    ) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let PromiseMessages {
            loading,
            success,
            error,
        } = messages;
        let loading_id = self.loading(loading, options.clone());

        let result = operation.await;

        let (variant, text) = match &result {
            Ok(_) => (Variant::Success, success),
            Err(_) => (Variant::Error, error),
        };
        debug!(id = %loading_id, outcome = %variant, "async operation settled");
        self.begin_dismiss(&loading_id);
        self.schedule_follow_up(text, variant, options);

        result
    }

    /// Same as [`Registry::promise`], starting the operation from a closure.
    pub async fn run_with_async_lifecycle<T, E, F, Fut>(
        &self,
        operation: F,
        messages: PromiseMessages,
        options: ToastOptions,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.promise(operation(), messages, options).await
    }

    /// Enqueue the outcome notification once the loading one has animated out.
    fn schedule_follow_up(&self, text: String, variant: Variant, options: ToastOptions) {
        let weak = self.downgrade();
        self.scheduler().schedule(
            self.config().exit_delay(),
            Box::new(move || match Registry::upgrade(&weak) {
                Some(registry) => {
                    registry.enqueue(text, variant, options);
                }
                None => trace!(variant = %variant, "follow-up after registry dropped"),
            }),
        );
    }
}
