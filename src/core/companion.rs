// Locate the navigation or precision file that accompanies a survey data file

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompanionKind {
    Navigation,
    Precision,
}

/// Resolves companion files under `<survey root>/pos/`.
///
/// The `.kin` sidecar names the preferred post-processed solution. The last
/// successful lookup is remembered per resolver; misses always go back to disk.
#[derive(Debug, Default)]
pub struct CompanionResolver {
    last: Option<(PathBuf, CompanionKind, PathBuf)>,
}

impl CompanionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve<P: AsRef<Path>>(&mut self, primary: P, kind: CompanionKind) -> Option<PathBuf> {
        let primary = primary.as_ref();
        if let Some((path, last_kind, found)) = &self.last {
            if path == primary && *last_kind == kind {
                return Some(found.clone());
            }
        }

        let found = Self::lookup(primary, kind);
        match &found {
            Some(path) => {
                debug!("{:?} companion for {:?}: {:?}", kind, primary, path);
                self.last = Some((primary.to_path_buf(), kind, path.clone()));
            }
            None => warn!("No {:?} companion found for {:?}", kind, primary),
        }
        found
    }

    fn lookup(primary: &Path, kind: CompanionKind) -> Option<PathBuf> {
        let base = companion_base_name(primary)?;
        let dir = companion_dir(primary);

        let preferred = read_first_line(&dir.join(format!("{base}.kin")));
        let preferred = match kind {
            CompanionKind::Navigation => preferred,
            CompanionKind::Precision => preferred.map(|name| precision_name(&name)),
        };

        if let Some(name) = preferred {
            // The sidecar may not match the on-disk case
            for candidate in [name.clone(), name.to_lowercase(), name.to_uppercase()] {
                let path = dir.join(candidate);
                if path.is_file() {
                    return Some(path);
                }
            }
        }

        match kind {
            CompanionKind::Navigation => {
                let path = dir.join(format!("{base}.pos"));
                path.is_file().then_some(path)
            }
            CompanionKind::Precision => None,
        }
    }
}

// .pgps files already carry the stem; others lose a 12-char suffix and DS becomes MD
fn companion_base_name(primary: &Path) -> Option<String> {
    let name = primary.file_name()?.to_str()?;
    let mut base = name.to_string();

    let is_pgps = primary.extension().and_then(|e| e.to_str()) == Some("pgps");
    if !is_pgps {
        if !name.is_ascii() || name.len() <= 12 {
            return None;
        }
        base.truncate(name.len() - 12);
        if base.len() >= 4 {
            base.replace_range(2..4, "MD");
        }
    }

    if let Some(dot) = base.rfind('.') {
        if dot > 0 {
            base.truncate(dot);
        }
    }
    Some(base)
}

fn companion_dir(primary: &Path) -> PathBuf {
    let root = match primary.parent() {
        None => PathBuf::from(".."),
        Some(p) if p.as_os_str().is_empty() || p == Path::new(".") => PathBuf::from(".."),
        Some(p) => match p.parent() {
            Some(gp) if !gp.as_os_str().is_empty() => gp.to_path_buf(),
            _ => PathBuf::from("."),
        },
    };
    root.join("pos")
}

fn read_first_line(path: &Path) -> Option<String> {
    let data = fs::read_to_string(path).ok()?;
    let line = data.lines().next()?.trim();
    (!line.is_empty()).then(|| line.to_string())
}

fn precision_name(sbet: &str) -> String {
    if let Some(at) = sbet.find("SBET") {
        format!("SMRMSG{}", &sbet[at + 4..])
    } else if let Some(at) = sbet.find("sbet") {
        format!("smrmsg{}", &sbet[at + 4..])
    } else {
        sbet.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // <root>/<line dir>/<data file>, companions in <root>/pos
    fn layout() -> (TempDir, PathBuf, PathBuf) {
        let root = TempDir::new().unwrap();
        let data_dir = root.path().join("hof");
        let pos_dir = root.path().join("pos");
        fs::create_dir_all(&data_dir).unwrap();
        fs::create_dir_all(&pos_dir).unwrap();
        let primary = data_dir.join("XXDS_240315_0001.pgps");
        fs::write(&primary, b"").unwrap();
        (root, primary, pos_dir)
    }

    #[test]
    fn test_base_name_rules() {
        assert_eq!(
            companion_base_name(Path::new("a/b/XXDS_240315_0001.pgps")).as_deref(),
            Some("XXDS_240315_0001")
        );
        assert_eq!(
            companion_base_name(Path::new("XXDS_240315_0001_0001_01.hof")).as_deref(),
            Some("XXMD_240315_0001")
        );
        assert_eq!(companion_base_name(Path::new("short.hof")), None);
    }

    #[test]
    fn test_precision_name() {
        assert_eq!(precision_name("SBET_240315_0001.out"), "SMRMSG_240315_0001.out");
        assert_eq!(precision_name("sbet_240315_0001.out"), "smrmsg_240315_0001.out");
        assert_eq!(precision_name("other.out"), "other.out");
    }

    #[test]
    fn test_companion_dir_without_parent() {
        assert_eq!(companion_dir(Path::new("file.pgps")), PathBuf::from("../pos"));
        assert_eq!(companion_dir(Path::new("a/b/file.pgps")), PathBuf::from("a/pos"));
    }

    #[test]
    fn test_navigation_prefers_kin_then_falls_back_to_pos() {
        let (_root, primary, pos_dir) = layout();
        let mut resolver = CompanionResolver::new();
        assert_eq!(resolver.resolve(&primary, CompanionKind::Navigation), None);

        let pos = pos_dir.join("XXDS_240315_0001.pos");
        fs::write(&pos, b"").unwrap();
        let mut resolver = CompanionResolver::new();
        assert_eq!(
            resolver.resolve(&primary, CompanionKind::Navigation),
            Some(pos.clone())
        );

        fs::write(pos_dir.join("XXDS_240315_0001.kin"), "SBET_240315_0001.OUT\r\n").unwrap();
        let sbet = pos_dir.join("sbet_240315_0001.out");
        fs::write(&sbet, b"").unwrap();
        let mut resolver = CompanionResolver::new();
        assert_eq!(resolver.resolve(&primary, CompanionKind::Navigation), Some(sbet));
    }

    #[test]
    fn test_precision_requires_kin() {
        let (_root, primary, pos_dir) = layout();
        let mut resolver = CompanionResolver::new();
        assert_eq!(resolver.resolve(&primary, CompanionKind::Precision), None);

        fs::write(pos_dir.join("XXDS_240315_0001.kin"), "SBET_240315_0001.out\n").unwrap();
        let rms = pos_dir.join("SMRMSG_240315_0001.out");
        fs::write(&rms, b"").unwrap();
        let mut resolver = CompanionResolver::new();
        assert_eq!(resolver.resolve(&primary, CompanionKind::Precision), Some(rms));
    }

    #[test]
    fn test_memo_is_per_resolver() {
        let (_root, primary, pos_dir) = layout();
        let pos = pos_dir.join("XXDS_240315_0001.pos");
        fs::write(&pos, b"").unwrap();

        let mut first = CompanionResolver::new();
        assert_eq!(first.resolve(&primary, CompanionKind::Navigation), Some(pos.clone()));

        fs::remove_file(&pos).unwrap();
        // cached answer survives in the resolver that made the lookup
        assert_eq!(first.resolve(&primary, CompanionKind::Navigation), Some(pos));
        let mut second = CompanionResolver::new();
        assert_eq!(second.resolve(&primary, CompanionKind::Navigation), None);
    }

    #[test]
    fn test_miss_is_retried_on_the_same_resolver() {
        let (_root, primary, pos_dir) = layout();
        let mut resolver = CompanionResolver::new();
        assert_eq!(resolver.resolve(&primary, CompanionKind::Navigation), None);

        let pos = pos_dir.join("XXDS_240315_0001.pos");
        fs::write(&pos, b"").unwrap();
        assert_eq!(resolver.resolve(&primary, CompanionKind::Navigation), Some(pos));
    }
}
