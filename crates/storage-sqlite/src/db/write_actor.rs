use std::any::Any;
use std::sync::Arc;

use diesel::SqliteConnection;
use storefront_core::errors::Result;
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;

// A unit of work executed on the writer's dedicated connection. Jobs
// return core Results since that is what callers expect back.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

// The return value is boxed as `dyn Any` so jobs of every type can share
// one channel; `exec` downcasts it back.
type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Cloneable handle for submitting jobs to the writer task.
///
/// SQLite permits a single writer at a time. Funnelling every mutation
/// through this handle serialises writes up front instead of letting
/// pooled connections contend for the write lock.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Executes a database job on the writer task's dedicated connection
    /// and returns its result.
    ///
    /// Each job runs inside its own immediate transaction.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |conn| job(conn).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("writer task stopped accepting jobs");

        ret_rx
            .await
            .expect("writer task dropped the reply sender without answering")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("writer job reply had an unexpected type"))
            })
    }
}

/// Spawns a background Tokio task that acts as the single writer to the
/// database. The task takes one connection from the pool and holds it for
/// its whole lifetime, applying queued jobs strictly in arrival order.
pub fn spawn_writer(pool: Arc<DbPool>) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("no connection available for the writer task");

        while let Some((job, reply_tx)) = rx.recv().await {
            // The job itself returns a core Result; errors cross the
            // transaction wrapper as StorageError::CoreError so their
            // structure survives.
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    job(c).map_err(StorageError::from)
                })
                .map_err(|e: StorageError| e.into());

            // The requester may have gone away; dropping the reply is fine.
            let _ = reply_tx.send(result);
        }
        // rx.recv() returned None: every WriteHandle is gone, stop.
    });

    WriteHandle { tx }
}
