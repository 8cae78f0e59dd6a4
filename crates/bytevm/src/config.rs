use typed_builder::TypedBuilder;

/// Default size of the flat address space (1 MiB).
pub const DEFAULT_MEMORY_SIZE: usize = 0x10_0000;
/// Default instruction budget for `Vm::run`.
pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;

#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct VmConfig {
    #[builder(default = DEFAULT_MEMORY_SIZE)]
    pub memory_size: usize,
    /// Where the program image is copied and where execution starts.
    #[builder(default = 0)]
    pub load_address: u32,
    /// Initial ESP. Defaults to the top of memory.
    #[builder(default, setter(strip_option))]
    pub stack_pointer: Option<u32>,
    #[builder(default = DEFAULT_MAX_STEPS)]
    pub max_steps: u64,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl VmConfig {
    pub fn initial_esp(&self) -> u32 {
        self.stack_pointer
            .unwrap_or_else(|| self.memory_size.min(u32::MAX as usize) as u32)
    }
}
