// Facade: one `start`/`shutdown` pair drives the CPU, memory, disk and GPU
// subsystems in the order a boot actually needs.

use std::io;

use crate::transcript::Transcript;

const BOOT_ADDRESS: u64 = 0x0000_7C00;
const BOOT_SECTOR: u64 = 0;
const SECTOR_SIZE: usize = 512;

// Subsystems. Each records what it did; none knows about the others.

#[derive(Default)]
pub struct Cpu {
    log: Vec<String>,
}

impl Cpu {
    pub fn freeze(&mut self) {
        self.log.push("cpu: freeze".to_string());
    }
    pub fn jump(&mut self, address: u64) {
        self.log.push(format!("cpu: jump to {address:#010x}"));
    }
    pub fn execute(&mut self) {
        self.log.push("cpu: execute".to_string());
    }
    pub fn halt(&mut self) {
        self.log.push("cpu: halt".to_string());
    }
}

#[derive(Default)]
pub struct Memory {
    log: Vec<String>,
}

impl Memory {
    pub fn load(&mut self, address: u64, data: &[u8]) {
        self.log
            .push(format!("memory: load {} bytes at {address:#010x}", data.len()));
    }
    pub fn clear(&mut self) {
        self.log.push("memory: clear".to_string());
    }
}

#[derive(Default)]
pub struct HardDrive {
    log: Vec<String>,
}

impl HardDrive {
    pub fn read(&mut self, sector: u64, size: usize) -> Vec<u8> {
        self.log
            .push(format!("hdd: read sector {sector} ({size} bytes)"));
        vec![0; size]
    }
    pub fn park(&mut self) {
        self.log.push("hdd: park heads".to_string());
    }
}

#[derive(Default)]
pub struct Gpu {
    log: Vec<String>,
}

impl Gpu {
    pub fn initialize(&mut self) {
        self.log.push("gpu: initialize".to_string());
    }
    pub fn render_splash(&mut self) {
        self.log.push("gpu: render boot splash".to_string());
    }
    pub fn power_down(&mut self) {
        self.log.push("gpu: power down".to_string());
    }
}

/// Drains each subsystem's log in call order. Subsystems append to their own
/// log, so the facade keeps the interleaving itself.
#[derive(Default)]
pub struct ComputerFacade {
    cpu: Cpu,
    memory: Memory,
    drive: HardDrive,
    gpu: Gpu,
    steps: Vec<String>,
}

impl ComputerFacade {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect(&mut self) {
        for log in [
            &mut self.cpu.log,
            &mut self.memory.log,
            &mut self.drive.log,
            &mut self.gpu.log,
        ] {
            self.steps.append(log);
        }
    }

    pub fn start(&mut self) -> Vec<String> {
        self.cpu.freeze();
        self.collect();
        let boot = self.drive.read(BOOT_SECTOR, SECTOR_SIZE);
        self.collect();
        self.memory.load(BOOT_ADDRESS, &boot);
        self.collect();
        self.gpu.initialize();
        self.collect();
        self.cpu.jump(BOOT_ADDRESS);
        self.collect();
        self.cpu.execute();
        self.collect();
        self.gpu.render_splash();
        self.collect();
        std::mem::take(&mut self.steps)
    }

    pub fn shutdown(&mut self) -> Vec<String> {
        self.gpu.power_down();
        self.collect();
        self.memory.clear();
        self.collect();
        self.drive.park();
        self.collect();
        self.cpu.halt();
        self.collect();
        std::mem::take(&mut self.steps)
    }
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let mut computer = ComputerFacade::new();
    for step in computer.start() {
        out.line("start", step)?;
    }
    for step in computer.shutdown() {
        out.line("shutdown", step)?;
    }
    Ok(())
}
