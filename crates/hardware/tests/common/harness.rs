use rvpipe_core::Simulator;
use rvpipe_core::config::Config;
use rvpipe_core::sim::{RunOutcome, Snapshot};

/// Owns a simulator and offers terse, panicking accessors for tests.
pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        Self {
            sim: Simulator::new(config),
        }
    }

    /// Assemble `source` and load it, panicking on assembly errors.
    pub fn asm(mut self, source: &str) -> Self {
        self.sim
            .load_assembly(source)
            .unwrap_or_else(|e| panic!("assembly failed: {e}"));
        self
    }

    /// Load pre-assembled words.
    pub fn words(mut self, words: &[u32]) -> Self {
        self.sim.load_words(words);
        self
    }

    /// Set a general-purpose register value.
    pub fn set_reg(&mut self, reg: usize, val: u32) {
        self.sim.write_register(reg, val).unwrap();
    }

    /// Read a general-purpose register value.
    pub fn get_reg(&self, reg: usize) -> u32 {
        self.sim.read_register(reg).unwrap()
    }

    /// Read a register by ABI name.
    pub fn reg(&self, name: &str) -> u32 {
        self.sim.read_register(name).unwrap()
    }

    /// Read a data-memory word.
    pub fn mem_word(&self, addr: u32) -> u32 {
        self.sim.read_memory_word(addr).unwrap()
    }

    /// Step once, panicking on a fault.
    pub fn step(&mut self) -> Snapshot {
        self.sim.step().unwrap()
    }

    /// Run with the given cycle cap, panicking on a fault.
    pub fn run(&mut self, max_cycles: u64) -> RunOutcome {
        self.sim.run(max_cycles).unwrap()
    }

    /// Run until the pipeline drains, asserting it does so within the default cap.
    pub fn run_to_drain(&mut self) -> u64 {
        match self.sim.run_to_completion().unwrap() {
            RunOutcome::Drained { cycles } => cycles,
            other => panic!("program did not drain: {other:?}"),
        }
    }
}
