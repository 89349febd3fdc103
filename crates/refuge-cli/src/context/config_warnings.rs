/// Config sections reachable through `REFUGE_<SECTION>__<KEY>` env vars.
const SECTIONS: [&str; 3] = ["DATABASE", "RESOLVER", "GENERAL"];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_mistyped_env() {
    for warning in collect_mistyped_env_warnings(std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_mistyped_env_warnings<I>(env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut warnings = Vec::new();
    for (key, _) in env {
        let Some(rest) = key.strip_prefix("REFUGE_") else {
            continue;
        };
        let mistyped = SECTIONS.iter().find(|section| {
            rest.strip_prefix(*section)
                .is_some_and(|tail| tail.starts_with('_') && !tail.starts_with("__"))
        });
        if let Some(section) = mistyped {
            warnings.push(format!(
                "{key} is ignored. Use double underscores after the section (example: REFUGE_{section}__{})",
                &rest[section.len() + 1..]
            ));
        }
    }
    warnings
}
