use crate::sync::{config::SourceSettings, model::source::Source};

/// Builds the list of configured sources.
///
/// With a multi-source descriptor (`name,host,port,db,user,password` records separated by
/// `;`) each well-formed record becomes a source; records with fewer than six fields or a
/// non-numeric port are skipped, so a descriptor made only of malformed records yields an
/// empty list. Without a descriptor exactly one source is built from the single-source
/// settings. Callers treat an empty list as a configuration error.
pub fn parse_sources(settings: &SourceSettings) -> Vec<Source> {
    match settings.descriptor.as_deref().map(str::trim) {
        Some(descriptor) if !descriptor.is_empty() => parse_descriptor(descriptor),
        _ => vec![single_source(settings)],
    }
}

fn parse_descriptor(descriptor: &str) -> Vec<Source> {
    descriptor
        .split(';')
        .map(str::trim)
        .filter(|record| !record.is_empty())
        .filter_map(parse_record)
        .collect()
}

fn parse_record(record: &str) -> Option<Source> {
    let parts: Vec<&str> = record.split(',').map(str::trim).collect();
    if parts.len() < 6 {
        return None;
    }

    let port = parts[2].parse::<u16>().ok()?;
    let name = if parts[0].is_empty() { parts[1] } else { parts[0] };

    Some(Source {
        name: name.to_string(),
        host: parts[1].to_string(),
        port,
        database: parts[3].to_string(),
        user: parts[4].to_string(),
        password: parts[5].to_string(),
    })
}

fn single_source(settings: &SourceSettings) -> Source {
    let name = if settings.database.is_empty() {
        "default".to_string()
    } else {
        settings.database.clone()
    };

    Source {
        name,
        host: settings.host.clone(),
        port: settings.port,
        database: settings.database.clone(),
        user: settings.user.clone(),
        password: settings.password.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(descriptor: Option<&str>) -> SourceSettings {
        SourceSettings {
            descriptor: descriptor.map(str::to_string),
            host: "db.local".to_string(),
            port: 3307,
            database: "ibs".to_string(),
            user: "reader".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn parses_multi_source_descriptor() {
        let sources = parse_sources(&settings(Some(
            " north, 10.0.0.1, 3306, ibs_n, u1, p1 ; south,10.0.0.2,3310,ibs_s,u2,p2;",
        )));

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].name, "north");
        assert_eq!(sources[0].host, "10.0.0.1");
        assert_eq!(sources[0].port, 3306);
        assert_eq!(sources[0].database, "ibs_n");
        assert_eq!(sources[1].name, "south");
        assert_eq!(sources[1].port, 3310);
        assert_eq!(sources[1].password, "p2");
    }

    #[test]
    fn skips_malformed_records() {
        let sources = parse_sources(&settings(Some(
            "short,10.0.0.1,3306;bad,10.0.0.2,port,db,u,p;ok,10.0.0.3,3306,db,u,p",
        )));

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, "ok");
    }

    /// A descriptor with no usable record gives no sources rather than the fallback
    #[test]
    fn all_malformed_yields_empty_list() {
        let sources = parse_sources(&settings(Some("a,b,c;d,e")));

        assert!(sources.is_empty());
    }

    #[test]
    fn empty_name_falls_back_to_host() {
        let sources = parse_sources(&settings(Some(",10.0.0.9,3306,db,u,p")));

        assert_eq!(sources[0].name, "10.0.0.9");
    }

    #[test]
    fn falls_back_to_single_source() {
        let sources = parse_sources(&settings(None));

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, "ibs");
        assert_eq!(sources[0].host, "db.local");
        assert_eq!(sources[0].port, 3307);

        let mut unnamed = settings(Some("   "));
        unnamed.database = String::new();
        let sources = parse_sources(&unnamed);
        assert_eq!(sources[0].name, "default");
    }
}
