use std::{
    fs::File,
    future::Future,
    io::Write,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Condvar, Mutex,
    },
};

use tokio::task;

#[derive(thiserror::Error, Debug)]
pub enum AppendError {
    #[error("Could not write to store: {0}")]
    Io(#[from] std::io::Error),

    #[error("Append task failed: {0}")]
    TaskFailed(#[from] task::JoinError),
}

/// Serves appends strictly in the order their tickets were issued.
struct Turnstile {
    issued: AtomicU64,
    serving: Mutex<u64>,
    turn_done: Condvar,
}

/// Append-only line store backed by a single file, created on first write.
///
/// Every call to [`append`](AsyncLineAppender::append) takes a ticket before
/// returning and the blocking writes are served in ticket order, so lines
/// land in request order no matter how the returned futures are awaited.
/// Each line goes down in one write, so two in-flight appends can never
/// interleave partial lines.
pub struct AsyncLineAppender {
    path: Arc<Path>,
    turnstile: Arc<Turnstile>,
}

impl AsyncLineAppender {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        AsyncLineAppender {
            path: Arc::from(file_path.into()),
            turnstile: Arc::new(Turnstile {
                issued: AtomicU64::new(0),
                serving: Mutex::new(0),
                turn_done: Condvar::new(),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a trailing newline to the store. The write is
    /// dispatched before this returns; the returned future only reports the
    /// outcome. Must be called from within a tokio runtime.
    pub fn append(&self, line: &str) -> impl Future<Output = Result<(), AppendError>> + Send {
        let path = Arc::clone(&self.path);
        let turnstile = Arc::clone(&self.turnstile);
        let ticket = turnstile.issued.fetch_add(1, Ordering::SeqCst);

        let mut buffer = Vec::with_capacity(line.len() + 1);
        buffer.extend_from_slice(line.as_bytes());
        buffer.push(b'\n');

        let handle = task::spawn_blocking(move || {
            let mut serving =
                turnstile.serving.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            while *serving != ticket {
                serving = turnstile
                    .turn_done
                    .wait(serving)
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
            }

            let result = write_line(&path, &buffer);

            // The turn advances even when the write failed, later tickets
            // must not wait forever behind a dead one.
            *serving += 1;
            turnstile.turn_done.notify_all();

            result
        });

        async move { handle.await?.map_err(AppendError::Io) }
    }
}

fn write_line(path: &Path, buffer: &[u8]) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = File::options().create(true).append(true).open(path)?;
    file.write_all(buffer)
}
