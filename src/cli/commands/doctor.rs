//! Doctor command - verify API keys and configuration.

use crate::artifact::ArtifactStore;
use crate::cli::output::format_size;
use crate::cli::Output;
use crate::config::Settings;
use crate::credentials::{
    mask, ELEVENLABS_API_KEY_ENV, FIRECRAWL_API_KEY_ENV, OPENAI_API_KEY_ENV,
};
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
///
/// Missing keys are warnings only: the web interface takes keys per request.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Blogcast Doctor");
    println!();

    let mut checks = Vec::new();

    println!("{}", style("API Keys (for `blogcast generate`)").bold());
    for (var, url) in [
        (OPENAI_API_KEY_ENV, "https://platform.openai.com/api-keys"),
        (ELEVENLABS_API_KEY_ENV, "https://elevenlabs.io/app/settings/api-keys"),
        (FIRECRAWL_API_KEY_ENV, "https://www.firecrawl.dev/app/api-keys"),
    ] {
        let check = check_api_key(var, std::env::var(var).ok().as_deref(), url);
        check.print();
        checks.push(check);
    }

    println!();

    println!("{}", style("Directories").bold());
    let dir_checks = check_directories(settings);
    for check in &dir_checks {
        check.print();
    }
    checks.extend(dir_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!("{} error(s) found.", errors));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Blogcast is ready to use.");
    }

    Ok(())
}

/// Check one API key value taken from the environment.
fn check_api_key(var: &str, value: Option<&str>, url: &str) -> CheckResult {
    let hint = format!("Set with: export {}='...' (get one at {})", var, url);
    match value {
        Some(key) if !key.is_empty() => {
            CheckResult::ok(var, &format!("configured ({})", mask(key)))
        }
        Some(_) => CheckResult::warning(var, "empty", &hint),
        None => CheckResult::warning(var, "not set", &hint),
    }
}

/// Check data and podcast directories.
fn check_directories(settings: &Settings) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let data_dir = settings.data_dir();
    if data_dir.exists() {
        results.push(CheckResult::ok("Data directory", &data_dir.display().to_string()));
    } else {
        results.push(CheckResult::warning(
            "Data directory",
            &format!("{} (will be created)", data_dir.display()),
            "Directory will be created on first use",
        ));
    }

    let store = ArtifactStore::new(settings.artifact_dir());
    match store.list() {
        Ok(items) if store.dir().exists() => {
            let total: u64 = items.iter().map(|i| i.size_bytes).sum();
            let retention = match settings.artifacts.max_files {
                Some(n) => format!("keeping latest {}", n),
                None => "keeping all".to_string(),
            };
            results.push(CheckResult::ok(
                "Podcasts",
                &format!(
                    "{} ({} file(s), {}, {})",
                    store.dir().display(),
                    items.len(),
                    format_size(total),
                    retention
                ),
            ));
        }
        Ok(_) => results.push(CheckResult::warning(
            "Podcasts",
            &format!("{} (not created yet)", store.dir().display()),
            "Directory will be created with the first podcast",
        )),
        Err(e) => results.push(CheckResult::error(
            "Podcasts",
            &format!("{}: {}", store.dir().display(), e),
            "Check permissions or set artifacts.dir in the config",
        )),
    }

    results
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        match Settings::load_from(Some(&config_path)) {
            Ok(_) => CheckResult::ok("Config file", &config_path.display().to_string()),
            Err(e) => CheckResult::error(
                "Config file",
                &format!("{} does not parse: {}", config_path.display(), e),
                "Fix with: blogcast config edit",
            ),
        }
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: blogcast config edit",
        )
    }
}
