/// Page-scoped, append-only sink for rendered script blocks.
///
/// The resolver appends at most one block per resolution; the page assembly
/// stage drains the buffer with [`emit`](Self::emit) when the response is
/// built.
#[derive(Debug, Default)]
pub struct ScriptBuffer {
    blocks: Vec<String>,
}

impl ScriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, block: String) {
        self.blocks.push(block);
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// Concatenate all blocks in append order.
    pub fn emit(&self) -> String {
        self.blocks.join("\n")
    }
}
