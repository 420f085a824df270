use std::fs;
use std::io::ErrorKind;
use std::os::unix::net::UnixStream as StdUnixStream;
use std::path::{Path, PathBuf};

use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::unix::OwnedWriteHalf;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::MissedTickBehavior;

use cycletrack_core::store::data_root_at;

use crate::error::{io_err, DaemonError};
use crate::paths::{socket_path, TICK_PERIOD};
use crate::protocol::{DaemonRequest, DaemonResponse};
use crate::session::Session;

/// One command bound for the session task, with its reply slot.
struct SessionJob {
    request: DaemonRequest,
    respond_to: oneshot::Sender<Result<serde_json::Value, String>>,
}

/// Start the daemon runtime and block the current thread until it exits.
pub fn start_blocking(home: &Path) -> Result<(), DaemonError> {
    init_tracing();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;
    runtime.block_on(run(home.to_path_buf()))
}

/// Run the daemon runtime.
pub async fn run(home: PathBuf) -> Result<(), DaemonError> {
    ensure_runtime_dirs(&home)?;

    let session = Session::bootstrap_at(&home)?;

    let (job_tx, job_rx) = mpsc::channel::<SessionJob>(64);
    let (shutdown_tx, _) = broadcast::channel::<()>(16);

    let session_handle = {
        let shutdown = shutdown_tx.clone();
        tokio::spawn(async move {
            let result = session_task(session, job_rx, shutdown.subscribe()).await;
            let _ = shutdown.send(());
            result
        })
    };

    let socket_handle = {
        let shutdown = shutdown_tx.clone();
        let home = home.clone();
        let job_tx = job_tx.clone();
        tokio::spawn(async move {
            let result =
                socket_server_task(home, job_tx, shutdown.clone(), shutdown.subscribe()).await;
            let _ = shutdown.send(());
            result
        })
    };

    let signal_handle = {
        let shutdown = shutdown_tx.clone();
        tokio::spawn(async move {
            let mut shutdown_rx = shutdown.subscribe();
            tokio::select! {
                _ = shutdown_rx.recv() => Ok(()),
                signal = tokio::signal::ctrl_c() => {
                    match signal {
                        Ok(()) => {
                            tracing::info!("received ctrl-c, shutting down daemon");
                            let _ = shutdown.send(());
                            Ok(())
                        }
                        Err(err) => Err(DaemonError::Protocol(format!("ctrl-c handler failed: {err}"))),
                    }
                }
            }
        })
    };

    let (session_result, socket_result, signal_result) =
        tokio::join!(session_handle, socket_handle, signal_handle);

    handle_join("session", session_result)?;
    handle_join("socket_server", socket_result)?;
    handle_join("signal_handler", signal_result)?;
    Ok(())
}

/// The session task is the only holder of mutable board state. Commands and
/// the countdown clock are serialized here, so a tick can never land in the
/// middle of a command.
async fn session_task(
    mut session: Session,
    mut job_rx: mpsc::Receiver<SessionJob>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), DaemonError> {
    let mut clock = tokio::time::interval(TICK_PERIOD);
    clock.set_missed_tick_behavior(MissedTickBehavior::Skip);
    clock.tick().await; // consume the first immediate tick

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            _ = clock.tick() => {
                session.tick();
            }
            maybe_job = job_rx.recv() => {
                let Some(job) = maybe_job else { break };
                let outcome = session
                    .apply(job.request)
                    .map_err(|err| err.to_string());
                let _ = job.respond_to.send(outcome);
            }
        }
    }

    Ok(())
}

async fn socket_server_task(
    home: PathBuf,
    job_tx: mpsc::Sender<SessionJob>,
    shutdown_tx: broadcast::Sender<()>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), DaemonError> {
    let socket = socket_path(&home);
    prepare_socket_for_bind(&socket)?;

    let listener = UnixListener::bind(&socket).map_err(|e| io_err(&socket, e))?;
    set_socket_permissions(&socket)?;
    tracing::info!(socket = %socket.display(), "daemon socket listening");

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            accepted = listener.accept() => {
                let (stream, _) = accepted.map_err(|e| io_err(&socket, e))?;
                let job_tx = job_tx.clone();
                let shutdown_tx = shutdown_tx.clone();
                tokio::spawn(async move {
                    if let Err(err) = handle_socket_client(stream, job_tx, shutdown_tx).await {
                        tracing::error!(error = %err, "socket client error");
                    }
                });
            }
        }
    }

    if socket.exists() {
        let _ = fs::remove_file(&socket);
    }
    Ok(())
}

async fn handle_socket_client(
    stream: UnixStream,
    job_tx: mpsc::Sender<SessionJob>,
    shutdown_tx: broadcast::Sender<()>,
) -> Result<(), DaemonError> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| io_err("daemon socket read", e))?
    {
        if line.trim().is_empty() {
            continue;
        }

        let request: Result<DaemonRequest, _> = serde_json::from_str(&line);
        let request = match request {
            Ok(request) => request,
            Err(err) => {
                write_response(
                    &mut writer,
                    &DaemonResponse::error(format!("invalid request JSON: {err}")),
                )
                .await?;
                continue;
            }
        };

        if matches!(request, DaemonRequest::Shutdown) {
            let _ = shutdown_tx.send(());
            write_response(
                &mut writer,
                &DaemonResponse::ok(json!({ "stopping": true })),
            )
            .await?;
            break;
        }

        let response = match submit(&job_tx, request).await {
            Ok(data) => DaemonResponse::ok(data),
            Err(err) => DaemonResponse::error(err.to_string()),
        };
        write_response(&mut writer, &response).await?;
    }

    Ok(())
}

async fn submit(
    job_tx: &mpsc::Sender<SessionJob>,
    request: DaemonRequest,
) -> Result<serde_json::Value, DaemonError> {
    let (tx, rx) = oneshot::channel();
    job_tx
        .send(SessionJob {
            request,
            respond_to: tx,
        })
        .await
        .map_err(|_| DaemonError::ChannelClosed("session queue"))?;

    let outcome = rx
        .await
        .map_err(|_| DaemonError::ChannelClosed("session response"))?;
    outcome.map_err(DaemonError::Protocol)
}

fn ensure_runtime_dirs(home: &Path) -> Result<(), DaemonError> {
    let root = data_root_at(home);
    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| io_err(&root, e))?;
        set_dir_permissions(&root)?;
    }
    Ok(())
}

fn prepare_socket_for_bind(socket: &Path) -> Result<(), DaemonError> {
    if !socket.exists() {
        return Ok(());
    }

    match StdUnixStream::connect(socket) {
        Ok(_) => {
            return Err(DaemonError::Protocol(format!(
                "daemon socket already in use: {}",
                socket.display()
            )));
        }
        Err(err) => {
            tracing::warn!(
                socket = %socket.display(),
                error = %err,
                "removing stale daemon socket before bind",
            );
        }
    }

    match fs::remove_file(socket) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(io_err(socket, err)),
    }
}

async fn write_response(
    writer: &mut OwnedWriteHalf,
    response: &DaemonResponse,
) -> Result<(), DaemonError> {
    let payload = serde_json::to_string(response)?;
    writer
        .write_all(payload.as_bytes())
        .await
        .map_err(|e| io_err("daemon socket write", e))?;
    writer
        .write_all(b"\n")
        .await
        .map_err(|e| io_err("daemon socket write", e))?;
    writer
        .flush()
        .await
        .map_err(|e| io_err("daemon socket flush", e))?;
    Ok(())
}

fn handle_join(
    task: &str,
    result: Result<Result<(), DaemonError>, tokio::task::JoinError>,
) -> Result<(), DaemonError> {
    match result {
        Ok(inner) => inner,
        Err(err) => Err(DaemonError::Protocol(format!(
            "{task} task join failure: {err}"
        ))),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

#[cfg(unix)]
fn set_socket_permissions(path: &Path) -> Result<(), DaemonError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| io_err(path, e))
}

#[cfg(not(unix))]
fn set_socket_permissions(_path: &Path) -> Result<(), DaemonError> {
    Ok(())
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), DaemonError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o700)).map_err(|e| io_err(path, e))
}

#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), DaemonError> {
    Ok(())
}
