use std::io::{self, Write};

use super::{Emission, Target};

/// The process's output streams. Every write is flushed before returning.
pub struct Sink {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
}

impl Sink {
    pub fn new(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self { out, err }
    }

    pub fn stdio() -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn write(&mut self, target: Target, text: &str) -> io::Result<()> {
        let writer = match target {
            Target::Stdout => &mut self.out,
            Target::Stderr => &mut self.err,
        };
        writer.write_all(text.as_bytes())?;
        writer.flush()
    }

    pub fn emit(&mut self, emission: &Emission) -> io::Result<()> {
        self.write(emission.target, &emission.text)
    }
}

/// In-memory writer whose clones share one buffer.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct SharedBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
