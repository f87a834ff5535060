use super::DbPool;
use crate::errors::StorageError;
use chatvault_core::errors::{DatabaseError, Error, Result};
use diesel::SqliteConnection;
use log::error;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

/// Capacity of the job queue in front of the writer.
pub const WRITER_QUEUE_CAPACITY: usize = 1024;

// Type alias for the job to be executed by the writer actor.
// It takes a mutable reference to a SqliteConnection and returns a Result.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type ErasedReply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
///
/// Every job runs inside one immediate transaction on the writer's dedicated
/// connection: if the job returns an error, none of its writes persist.
/// Jobs may open nested transactions, which become savepoints.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, ErasedReply)>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// # Arguments
    /// * `job`: A closure that takes a mutable reference to `SqliteConnection`
    ///   and performs database operations.
    ///
    /// # Returns
    /// A `Result<T>` containing the outcome of the job. Errors raised by the
    /// job are returned unchanged after the rollback.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_stopped())?;

        let boxed = ret_rx.await.map_err(|_| writer_stopped())??;
        boxed
            .downcast::<T>()
            .map(|v| *v)
            .map_err(|_| Error::Unexpected("Failed to downcast writer actor result".to_string()))
    }
}

fn writer_stopped() -> Error {
    Error::Database(DatabaseError::ConnectionFailed(
        "writer actor is not running".to_string(),
    ))
}

/// Spawns a background Tokio task that acts as a single writer to the database.
/// This actor owns one database connection from the pool and processes write jobs serially.
///
/// # Arguments
/// * `pool`: The database connection pool.
///
/// # Returns
/// A `WriteHandle` to send jobs to the spawned actor.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, ErasedReply)>(WRITER_QUEUE_CAPACITY);

    tokio::spawn(async move {
        // Held for the lifetime of the actor; re-acquired if the pool was
        // exhausted when a job arrived.
        let mut conn = None;

        while let Some((job, reply_tx)) = rx.recv().await {
            if conn.is_none() {
                match pool.get() {
                    Ok(c) => conn = Some(c),
                    Err(e) => error!("Writer actor could not acquire a connection: {}", e),
                }
            }

            let result: Result<Box<dyn Any + Send + 'static>> = match conn.as_mut() {
                Some(c) => c
                    .immediate_transaction::<_, StorageError, _>(|c| {
                        job(c).map_err(StorageError::from)
                    })
                    .map_err(Error::from),
                None => Err(Error::Database(DatabaseError::ConnectionFailed(
                    "writer has no database connection".to_string(),
                ))),
            };

            // Ignore error if the receiver has dropped (e.g., request timed out or was cancelled).
            let _ = reply_tx.send(result);
        }
        // The last WriteHandle was dropped.
    });

    WriteHandle { tx }
}
