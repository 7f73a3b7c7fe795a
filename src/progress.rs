use std::{
    io::Write,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{sleep, spawn, JoinHandle},
    time::Duration,
};

use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveToColumn,
    execute,
    style::Print,
    terminal::{Clear, ClearType},
};

use crate::logger;

const FRAMES: [&str; 4] = ["   ", ".  ", ".. ", "..."];

/// Animates a message on a separate thread until stopped.
pub struct Spinner<W> {
    writer: W,
    message: String,
    rate: Duration,
    is_terminated: Arc<AtomicBool>,
}

pub struct SpinnerHandle<W> {
    message: String,
    is_terminated: Arc<AtomicBool>,
    handle: JoinHandle<Result<W>>,
}

impl<W> Spinner<W>
where
    W: Write + Send + 'static,
{
    pub fn new(writer: W, message: impl Into<String>, rate: Duration) -> Self {
        Self {
            writer,
            message: message.into(),
            rate,
            is_terminated: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn start(self) -> SpinnerHandle<W> {
        logger!(info, "Start spinner");

        let message = self.message.clone();
        let is_terminated = self.is_terminated.clone();

        let handle = spawn(move || self.spin());

        SpinnerHandle {
            message,
            is_terminated,
            handle,
        }
    }

    fn spin(mut self) -> Result<W> {
        for frame in FRAMES.iter().cycle() {
            if self.is_terminated.load(Ordering::Relaxed) {
                break;
            }

            execute!(
                self.writer,
                MoveToColumn(0),
                Print(&self.message),
                Print(frame)
            )?;

            sleep(self.rate);
        }

        Ok(self.writer)
    }
}

impl<W> SpinnerHandle<W>
where
    W: Write + Send + 'static,
{
    /// Stops the animation and replaces the line with `suffix` appended
    /// to the message.
    pub fn finish(self, suffix: &str) -> Result<()> {
        let message = format!("{}{}\n\n", self.message, suffix);

        let mut writer = self.join()?;

        execute!(
            writer,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(message)
        )?;

        Ok(())
    }

    /// Stops the animation and clears the line.
    pub fn clear(self) -> Result<()> {
        let mut writer = self.join()?;

        execute!(writer, MoveToColumn(0), Clear(ClearType::CurrentLine))?;

        Ok(())
    }

    fn join(self) -> Result<W> {
        self.is_terminated.store(true, Ordering::Relaxed);

        let writer = self
            .handle
            .join()
            .map_err(|_| anyhow!("spinner thread panicked"))??;

        logger!(info, "Terminated spinner");

        Ok(writer)
    }
}
