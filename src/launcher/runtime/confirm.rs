use std::{fs::File, io};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::{launcher::resolve::Confirmation, lib::errors::LaunchError};

pub const CONFIRM_PROMPT: &str = "Press ENTER to continue with the frontend...";

/// Unbuffered handle on stdin; bytes after the confirming line stay for the launched process.
pub fn operator_input() -> io::Result<tokio::fs::File> {
    #[cfg(unix)]
    let owned = {
        use std::os::fd::AsFd;
        io::stdin().as_fd().try_clone_to_owned()?
    };
    #[cfg(windows)]
    let owned = {
        use std::os::windows::io::AsHandle;
        io::stdin().as_handle().try_clone_to_owned()?
    };
    Ok(tokio::fs::File::from_std(File::from(owned)))
}

/// Print the operator instructions and block until one line (or end of input) arrives.
///
/// Input is consumed one byte at a time up to and including the first newline.
pub async fn await_operator<R, W>(
    confirmation: &Confirmation,
    mut input: R,
    output: &mut W,
) -> Result<(), LaunchError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut banner = confirmation.instructions.join("\n");
    banner.push('\n');
    banner.push_str(CONFIRM_PROMPT);
    write_flushed(output, banner.as_bytes()).await?;

    let mut byte = [0u8; 1];
    loop {
        let read = input
            .read(&mut byte)
            .await
            .map_err(|source| LaunchError::Confirm { source })?;
        if read == 0 || byte[0] == b'\n' {
            break;
        }
    }

    write_flushed(output, b"\n").await
}

async fn write_flushed<W>(output: &mut W, bytes: &[u8]) -> Result<(), LaunchError>
where
    W: AsyncWrite + Unpin,
{
    output
        .write_all(bytes)
        .await
        .map_err(|source| LaunchError::Confirm { source })?;
    output
        .flush()
        .await
        .map_err(|source| LaunchError::Confirm { source })
}
