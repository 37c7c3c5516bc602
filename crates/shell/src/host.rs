//! Host operating system facts for the `os` command.

use std::fmt::Write as _;

/// Line terminator of the host platform.
#[cfg(windows)]
pub const EOL: &str = "\r\n";
#[cfg(not(windows))]
pub const EOL: &str = "\n";

/// A fact that `os` can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFact {
    Eol,
    Cpus,
    HomeDir,
    Username,
    Architecture,
}

impl OsFact {
    /// Parses an `os` flag such as `--EOL` or `--cpus`.
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "--EOL" => Some(OsFact::Eol),
            "--cpus" => Some(OsFact::Cpus),
            "--homedir" => Some(OsFact::HomeDir),
            "--username" => Some(OsFact::Username),
            "--architecture" => Some(OsFact::Architecture),
            _ => None,
        }
    }
}

/// One logical CPU.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuInfo {
    pub model: String,
    /// Clock rate in MHz, when the platform exposes it.
    pub mhz: Option<f64>,
}

/// Renders `fact` for display.
pub fn report(fact: OsFact) -> String {
    match fact {
        OsFact::Eol => format!("{EOL:?}"),
        OsFact::Cpus => render_cpus(&cpus()),
        OsFact::HomeDir => fileshell_file_ops::home_dir().display().to_string(),
        OsFact::Username => system_username(),
        OsFact::Architecture => std::env::consts::ARCH.to_string(),
    }
}

fn render_cpus(cpus: &[CpuInfo]) -> String {
    let mut out = format!("Overall amount of CPUs: {}", cpus.len());
    for (i, cpu) in cpus.iter().enumerate() {
        match cpu.mhz {
            Some(mhz) => {
                let _ = write!(out, "\n{}: {}, {:.2} GHz", i + 1, cpu.model, mhz / 1000.0);
            }
            None => {
                let _ = write!(out, "\n{}: {}, clock rate unknown", i + 1, cpu.model);
            }
        }
    }
    out
}

/// Lists the host's logical CPUs.
pub fn cpus() -> Vec<CpuInfo> {
    #[cfg(target_os = "linux")]
    {
        if let Ok(text) = std::fs::read_to_string("/proc/cpuinfo") {
            let parsed = parse_cpuinfo(&text);
            if !parsed.is_empty() {
                return parsed;
            }
        }
        tracing::warn!("could not read /proc/cpuinfo, falling back to CPU count");
    }

    let count = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    vec![
        CpuInfo {
            model: "unknown".into(),
            mhz: None,
        };
        count
    ]
}

/// Parses `/proc/cpuinfo` into one entry per `processor` block.
pub fn parse_cpuinfo(text: &str) -> Vec<CpuInfo> {
    let mut cpus = Vec::new();

    for block in text.split("\n\n") {
        let mut is_cpu = false;
        let mut model = None;
        let mut mhz = None;

        for line in block.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "processor" => is_cpu = true,
                "model name" | "Processor" | "cpu model" => model = Some(value.to_string()),
                "cpu MHz" => mhz = value.parse::<f64>().ok(),
                _ => {}
            }
        }

        if is_cpu {
            cpus.push(CpuInfo {
                model: model.unwrap_or_else(|| "unknown".into()),
                mhz,
            });
        }
    }

    cpus
}

/// Account name of the user running the process.
pub fn system_username() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".into())
}
