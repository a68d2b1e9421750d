use anyhow::Result;
use idlewatch::app::run_shell;
use tracing::error;

// The session model is cooperative and single threaded, so the shell runs on
// a current-thread runtime.
fn main() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        run_shell().await.inspect_err(|e| {
            error!("Error running session shell {e:?}");
        })
    })?;
    Ok(())
}
