use once_cell::sync::Lazy;
use std::future::Future;

pub static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime")
});

pub fn spawn_async<F>(fut: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    RUNTIME.spawn(fut);
}

/// Runs `fut` on the tokio runtime and calls `done` with its output on the GTK main loop.
pub fn run_async_to_main<T, Fut, D>(fut: Fut, done: D)
where
    T: Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
    D: FnOnce(T) + 'static,
{
    let (tx, rx) = tokio::sync::oneshot::channel::<T>();
    spawn_async(async move {
        let _ = tx.send(fut.await);
    });
    glib::MainContext::default().spawn_local(async move {
        match rx.await {
            Ok(value) => done(value),
            Err(_) => log::error!("background task dropped before finishing"),
        }
    });
}
