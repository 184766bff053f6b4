//! Lets a caller stop a pass that is blocked on a long scan by closing its source.
use std::io::{self, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::ParseError;
use crate::parser::record::FastqRecord;
use crate::parser::utils::{LineEnding, Position, RecordStream};

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "source was closed")
}

/// Closes the source of a [`ClosableReader`], possibly from another thread.
#[derive(Debug, Clone)]
pub struct CloseHandle {
    closed: Arc<AtomicBool>,
}

impl CloseHandle {
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

/// A reader whose every read fails once its [`CloseHandle`] was closed.
#[derive(Debug)]
pub struct ClosableReader<R> {
    inner: R,
    closed: Arc<AtomicBool>,
}

impl<R: Read> ClosableReader<R> {
    pub fn new(inner: R) -> (Self, CloseHandle) {
        let closed = Arc::new(AtomicBool::new(false));
        let handle = CloseHandle {
            closed: Arc::clone(&closed),
        };
        (Self { inner, closed }, handle)
    }
}

impl<R: Read> Read for ClosableReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.closed.load(Ordering::Acquire) {
            return Err(closed_error());
        }
        self.inner.read(buf)
    }
}

/// A record stream that stops at the first `next` call after its
/// [`CloseHandle`] was closed, even if records are still buffered.
pub struct ClosableStream<'a> {
    inner: Box<dyn RecordStream + 'a>,
    handle: CloseHandle,
    finished: bool,
}

impl<'a> ClosableStream<'a> {
    pub fn new(inner: Box<dyn RecordStream + 'a>, handle: CloseHandle) -> Self {
        Self {
            inner,
            handle,
            finished: false,
        }
    }
}

impl<'a> RecordStream for ClosableStream<'a> {
    fn next(&mut self) -> Option<Result<FastqRecord<'_>, ParseError>> {
        if self.finished {
            return None;
        }
        if self.handle.is_closed() {
            self.finished = true;
            return Some(Err(ParseError::new_source_closed(&closed_error())));
        }
        self.inner.next()
    }

    fn position(&self) -> &Position {
        self.inner.position()
    }

    fn line_ending(&self) -> Option<LineEnding> {
        self.inner.line_ending()
    }
}
