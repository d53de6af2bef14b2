//! Test builders — ergonomic constructors for apiserver log lines.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

/// Fluent builder for an apiserver request line.
///
/// # Example
///
/// ```rust
/// let line = RequestLine::new("/api/v1/nodes")
///     .method("LIST")
///     .latency("12ms")
///     .code(200)
///     .caller("kubectl/v1.13")
///     .build();
/// ```
pub struct RequestLine {
    time: String,
    method: String,
    path: String,
    latency: String,
    code: String,
    caller: String,
}

impl RequestLine {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            time: "10:20:30.123456".to_string(),
            method: "GET".to_string(),
            path: path.into(),
            latency: "5ms".to_string(),
            code: "200".to_string(),
            caller: "caller-abc".to_string(),
        }
    }

    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    /// Time of day `micros` microseconds after 10:00:00.
    pub fn micros(self, micros: u64) -> Self {
        let secs = micros / 1_000_000;
        let time = format!(
            "{:02}:{:02}:{:02}.{:06}",
            10 + secs / 3600 % 14,
            secs / 60 % 60,
            secs % 60,
            micros % 1_000_000
        );
        self.time(time)
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn latency(mut self, latency: impl Into<String>) -> Self {
        self.latency = latency.into();
        self
    }

    pub fn code(mut self, code: impl ToString) -> Self {
        self.code = code.to_string();
        self
    }

    pub fn caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = caller.into();
        self
    }

    pub fn build(self) -> String {
        format!(
            "I0101 {} 1234 wrap.go:47] {} {}: ({}) {} [{} 10.0.0.1:443]",
            self.time, self.method, self.path, self.latency, self.code, self.caller
        )
    }
}

/// Join lines into newline-terminated input text.
pub fn input_text<S: AsRef<str>>(lines: &[S]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(line.as_ref());
        text.push('\n');
    }
    text
}
