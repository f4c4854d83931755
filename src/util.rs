use std::io::Write;
use std::time::Instant;

/// Measures elapsed wall-clock time between ticks.
pub struct Timer {
    last: Instant,
}

impl Timer {
    /// Starts a new timer.
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Returns elapsed time (s) since the last call to this function,
    /// or since the timer was created, and resets the timer.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        elapsed
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered key/value sink that renders as a single JSON object.
///
/// The builders write their phase timings here; the driver decides when
/// to flush. Values are rendered with `Display` and quoted as strings.
#[derive(Debug, Default)]
pub struct JsonLogger {
    entries: Vec<(String, String)>,
}

impl JsonLogger {
    /// Creates an empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a key/value pair. Keys are kept in insertion order.
    pub fn add(&mut self, key: &str, value: impl std::fmt::Display) {
        self.entries.push((key.to_string(), value.to_string()));
    }

    /// Writes all pairs as one JSON object followed by a newline.
    pub fn write(&self, os: &mut impl Write) -> std::io::Result<()> {
        write!(os, "{{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(os, ", ")?;
            }
            write!(os, "\"{}\": \"{}\"", key, value)?;
        }
        writeln!(os, "}}")
    }
}
