//! Line-oriented message input for the console front-end

const FENCE: &str = "```";

/// Joins input lines into chat messages. A message ends at the end of a line
/// unless it has an unclosed code fence, in which case lines accumulate until
/// the fence closes.
#[derive(Debug, Default)]
pub struct MessageAssembler {
    buffer: Vec<String>,
}

impl MessageAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) -> Option<String> {
        if self.buffer.is_empty() && line.trim().is_empty() {
            return None;
        }

        self.buffer.push(line.to_string());
        let fences: usize = self.buffer.iter().map(|l| l.matches(FENCE).count()).sum();
        if fences % 2 == 1 {
            return None;
        }

        Some(std::mem::take(&mut self.buffer).join("\n"))
    }

    /// Whatever is left when input ends, even with an unclosed fence.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer).join("\n"))
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.buffer.is_empty()
    }
}
