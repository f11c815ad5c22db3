// Builder: a fluent computer builder with director presets, and a director
// that drives interchangeable builders through an ordered list of steps.

use std::io;

use itertools::Itertools;

use crate::transcript::Transcript;

// ============================================================================
// Example: Fluent builder with defaults
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Computer {
    cpu: String,
    ram: String,
    storage: String,
    gpu: String,
    wifi: bool,
    bluetooth: bool,
}

impl Computer {
    pub fn specs(&self) -> String {
        let mut parts = vec![
            format!("cpu={}", self.cpu),
            format!("ram={}", self.ram),
            format!("storage={}", self.storage),
            format!("gpu={}", self.gpu),
        ];
        if self.wifi {
            parts.push("wifi".to_string());
        }
        if self.bluetooth {
            parts.push("bluetooth".to_string());
        }
        parts.join(", ")
    }
}

pub struct ComputerBuilder {
    cpu: Option<String>,
    ram: Option<String>,
    storage: Option<String>,
    gpu: Option<String>,
    wifi: bool,
    bluetooth: bool,
}

impl ComputerBuilder {
    pub fn new() -> Self {
        Self {
            cpu: None,
            ram: None,
            storage: None,
            gpu: None,
            wifi: false,
            bluetooth: false,
        }
    }

    pub fn cpu(mut self, cpu: impl Into<String>) -> Self {
        self.cpu = Some(cpu.into());
        self
    }

    pub fn ram(mut self, ram: impl Into<String>) -> Self {
        self.ram = Some(ram.into());
        self
    }

    pub fn storage(mut self, storage: impl Into<String>) -> Self {
        self.storage = Some(storage.into());
        self
    }

    pub fn gpu(mut self, gpu: impl Into<String>) -> Self {
        self.gpu = Some(gpu.into());
        self
    }

    pub fn wifi(mut self) -> Self {
        self.wifi = true;
        self
    }

    pub fn bluetooth(mut self) -> Self {
        self.bluetooth = true;
        self
    }

    pub fn build(self) -> Computer {
        Computer {
            cpu: self.cpu.unwrap_or_else(|| "4-core".to_string()),
            ram: self.ram.unwrap_or_else(|| "8GB".to_string()),
            storage: self.storage.unwrap_or_else(|| "256GB SSD".to_string()),
            gpu: self.gpu.unwrap_or_else(|| "integrated".to_string()),
            wifi: self.wifi,
            bluetooth: self.bluetooth,
        }
    }
}

impl Default for ComputerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Canned configurations.
pub struct Presets;

impl Presets {
    pub fn gaming() -> Computer {
        ComputerBuilder::new()
            .cpu("16-core")
            .ram("64GB DDR5")
            .storage("2TB NVMe")
            .gpu("discrete 24GB")
            .wifi()
            .bluetooth()
            .build()
    }

    pub fn office() -> Computer {
        ComputerBuilder::new()
            .cpu("6-core")
            .ram("16GB DDR4")
            .storage("512GB SSD")
            .wifi()
            .build()
    }
}

// ============================================================================
// Example: Director driving interchangeable builders
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Cpu,
    Memory,
    Storage,
}

pub trait AssemblyBuilder {
    fn reset(&mut self);
    fn add(&mut self, step: Step);
    fn result(&self) -> String;
}

/// Lists installed parts in the order they were added.
#[derive(Default)]
pub struct SpecSheetBuilder {
    parts: Vec<&'static str>,
}

impl AssemblyBuilder for SpecSheetBuilder {
    fn reset(&mut self) {
        self.parts.clear();
    }

    fn add(&mut self, step: Step) {
        self.parts.push(match step {
            Step::Cpu => "cpu",
            Step::Memory => "ram",
            Step::Storage => "ssd",
        });
    }

    fn result(&self) -> String {
        format!("sheet[{}]", self.parts.join(" | "))
    }
}

/// Writes numbered instructions for a technician.
#[derive(Default)]
pub struct ManualBuilder {
    instructions: Vec<&'static str>,
}

impl AssemblyBuilder for ManualBuilder {
    fn reset(&mut self) {
        self.instructions.clear();
    }

    fn add(&mut self, step: Step) {
        self.instructions.push(match step {
            Step::Cpu => "seat the processor",
            Step::Memory => "insert the memory",
            Step::Storage => "mount the drive",
        });
    }

    fn result(&self) -> String {
        self.instructions
            .iter()
            .enumerate()
            .map(|(i, text)| format!("{}. {}", i + 1, text))
            .join("; ")
    }
}

pub struct Director {
    name: &'static str,
    order: Vec<Step>,
}

impl Director {
    pub fn new(name: &'static str, order: Vec<Step>) -> Self {
        Self { name, order }
    }

    pub fn construct(&self, builder: &mut dyn AssemblyBuilder) -> String {
        builder.reset();
        for &step in &self.order {
            builder.add(step);
        }
        builder.result()
    }
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    out.line("preset.gaming", Presets::gaming().specs())?;
    out.line("preset.office", Presets::office().specs())?;
    let custom = ComputerBuilder::new()
        .cpu("8-core")
        .ram("32GB DDR5")
        .gpu("discrete 12GB")
        .bluetooth()
        .build();
    out.line("custom", custom.specs())?;

    let directors = [
        Director::new("standard", vec![Step::Cpu, Step::Memory, Step::Storage]),
        Director::new("storage-first", vec![Step::Storage, Step::Cpu, Step::Memory]),
    ];
    let mut sheet = SpecSheetBuilder::default();
    let mut manual = ManualBuilder::default();

    let mut results = Vec::new();
    for director in &directors {
        let builders: [(&str, &mut dyn AssemblyBuilder); 2] =
            [("sheet", &mut sheet), ("manual", &mut manual)];
        for (kind, builder) in builders {
            let result = director.construct(builder);
            out.line(&format!("{}.{}", director.name, kind), &result)?;
            results.push(result);
        }
    }
    out.check("all-distinct", results.iter().all_unique())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::capture;

    #[test]
    fn test_builder_defaults() {
        let computer = ComputerBuilder::new().build();
        assert_eq!(computer.specs(), "cpu=4-core, ram=8GB, storage=256GB SSD, gpu=integrated");
    }

    #[test]
    fn test_presets() {
        assert!(Presets::gaming().specs().ends_with("wifi, bluetooth"));
        assert!(Presets::office().specs().ends_with("gpu=integrated, wifi"));
    }

    #[test]
    fn test_director_order_matters() {
        let standard = Director::new("a", vec![Step::Cpu, Step::Memory, Step::Storage]);
        let reversed = Director::new("b", vec![Step::Storage, Step::Memory, Step::Cpu]);
        let mut sheet = SpecSheetBuilder::default();
        assert_eq!(standard.construct(&mut sheet), "sheet[cpu | ram | ssd]");
        assert_eq!(reversed.construct(&mut sheet), "sheet[ssd | ram | cpu]");
    }

    #[test]
    fn test_builders_differ_for_same_steps() {
        let director = Director::new("a", vec![Step::Cpu, Step::Storage]);
        let sheet = director.construct(&mut SpecSheetBuilder::default());
        let manual = director.construct(&mut ManualBuilder::default());
        assert_eq!(manual, "1. seat the processor; 2. mount the drive");
        assert_ne!(sheet, manual);
    }

    #[test]
    fn test_transcript() {
        let text = capture(run).unwrap();
        assert!(text.contains("standard.sheet: sheet[cpu | ram | ssd]\n"));
        assert!(text.contains("storage-first.sheet: sheet[ssd | cpu | ram]\n"));
        assert!(text.contains("all-distinct: true\n"));
    }
}
