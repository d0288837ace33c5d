use sysinfo::System;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// One point-in-time reading of the host and of the bot process.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub total_memory: u64,
    pub free_memory: u64,
    pub cpu_model: String,
    pub cpu_cores: usize,
    pub load_average: f64,
    pub runtime_version: String,
    pub platform: String,
    pub arch: String,
    pub host_name: String,
}

impl MetricsSnapshot {
    /// Reads the running process and host. Missing data falls back to
    /// defaults instead of failing.
    pub fn collect() -> Self {
        let sys = System::new_all();

        let uptime_secs = sysinfo::get_current_pid()
            .ok()
            .and_then(|pid| sys.process(pid))
            .map(|process| process.run_time())
            .unwrap_or(0);

        let cpus = sys.cpus();
        let cpu_model = cpus
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());

        Self {
            uptime_secs,
            total_memory: sys.total_memory(),
            free_memory: sys.available_memory(),
            cpu_model,
            cpu_cores: cpus.len().max(1),
            load_average: System::load_average().one,
            runtime_version: format!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            platform: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            host_name: System::host_name().unwrap_or_else(|| "unknown".to_string()),
        }
    }

    pub fn used_memory(&self) -> u64 {
        self.total_memory.saturating_sub(self.free_memory)
    }

    pub fn ram_usage_percent(&self) -> f64 {
        if self.total_memory == 0 {
            return 0.0;
        }
        clamp_percent(self.used_memory() as f64 / self.total_memory as f64 * 100.0)
    }

    /// Negative or non-finite load readings count as idle.
    pub fn load(&self) -> f64 {
        if self.load_average.is_finite() && self.load_average > 0.0 {
            self.load_average
        } else {
            0.0
        }
    }

    pub fn cpu_load_percent(&self) -> f64 {
        clamp_percent(self.load() / self.cpu_cores.max(1) as f64 * 100.0)
    }

    pub fn used_memory_mb(&self) -> f64 {
        self.used_memory() as f64 / BYTES_PER_MB
    }

    pub fn total_memory_mb(&self) -> f64 {
        self.total_memory as f64 / BYTES_PER_MB
    }
}

/// The single clamp shared by the text report and the bar geometry, so the
/// printed number and the drawn fill always agree.
pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86400;
    let hours = (seconds % 86400) / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{}d {}h {}m {}s", days, hours, minutes, secs)
}
