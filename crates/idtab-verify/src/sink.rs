//! Display sinks receive one formatted line per checked proof and per
//! active cryptocurrency binding.

use parking_lot::Mutex;

pub trait DisplaySink: Send + Sync {
    fn line(&self, line: &str);
}

/// Writes lines to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl DisplaySink for StdoutSink {
    fn line(&self, line: &str) {
        println!("{line}");
    }
}

/// Collects lines in memory.
#[derive(Debug, Default)]
pub struct VecSink {
    lines: Mutex<Vec<String>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl DisplaySink for VecSink {
    fn line(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}
