//! Line-oriented builder used by every artifact template

/// Accumulates lines of TypeScript at a tracked indentation depth.
#[derive(Debug, Default, Clone)]
pub struct CodeBuilder {
    lines: Vec<String>,
    depth: usize,
}

impl CodeBuilder {
    const INDENT: usize = 2;

    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line at the current depth
    pub fn line(&mut self, line: impl AsRef<str>) -> &mut Self {
        let line = line.as_ref();
        if line.trim().is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", " ".repeat(self.depth * Self::INDENT), line));
        }
        self
    }

    /// Append a multi-line block, keeping its relative indentation
    pub fn lines(&mut self, block: impl AsRef<str>) -> &mut Self {
        for line in block.as_ref().lines() {
            self.line(line);
        }
        self
    }

    /// A single separating blank line; never doubled, never leading
    pub fn blank(&mut self) -> &mut Self {
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
        self
    }

    pub fn open(&mut self, header: impl AsRef<str>) -> &mut Self {
        self.line(header);
        self.depth += 1;
        self
    }

    pub fn close(&mut self, footer: impl AsRef<str>) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        // Drop a blank line left just before a closing delimiter
        if self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        self.line(footer)
    }

    /// A line that closes one branch and opens the next, like `} else {`
    pub fn branch(&mut self, line: impl AsRef<str>) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(line);
        self.depth += 1;
        self
    }

    pub fn block(
        &mut self,
        header: impl AsRef<str>,
        footer: impl AsRef<str>,
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.open(header);
        body(self);
        self.close(footer)
    }

    pub fn build(&self) -> String {
        let mut lines: Vec<&str> = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            if line.is_empty() && lines.last().is_none_or(|l| l.is_empty()) {
                continue;
            }
            lines.push(line);
        }
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}
