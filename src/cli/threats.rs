use std::path::Path;
use serde_json::json;
use crate::cli::commands::ThreatsArgs;
use crate::cli::render;
use crate::config::TriageConfig;
use crate::errors::TriageError;
use crate::mapping::EmbeddedThreatTable;
use crate::normalize::normalize_weakness_id;

pub fn handle_threats(args: ThreatsArgs, config: &TriageConfig) -> Result<(), TriageError> {
    let weakness_id = normalize_weakness_id(&args.weakness).ok_or_else(|| {
        TriageError::MalformedIdentifier(format!("'{}' is not a weakness id", args.weakness))
    })?;
    let table = match &config.embedded_threats_file {
        Some(path) => EmbeddedThreatTable::from_yaml_file(Path::new(path))?,
        None => EmbeddedThreatTable::bundled(),
    };
    let threats = table.links(&weakness_id);

    if args.json {
        let body = json!({
            "weakness_id": weakness_id,
            "table_version": table.version(),
            "count": threats.len(),
            "threats": threats,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if threats.is_empty() {
        println!("No embedded threat mapping for {} (table {})", weakness_id, table.version());
        return Ok(());
    }
    println!("{}", render::render_threat_links(&weakness_id, &threats));
    Ok(())
}
