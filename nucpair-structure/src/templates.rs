use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use nucpair_geometry::Vec3;

use crate::{Atom, BaseIdentity, StructureError};
use crate::typing::{PURINE_RING_ATOMS, PYRIMIDINE_RING_ATOMS};

/// Canonical coordinates of a single base, loaded from a template file.
///
/// A template is a set of labeled atom positions in the standard reference frame of
/// the base; the ring-atom subset can be extracted by atom name.
#[derive(Clone, Debug)]
pub struct BaseTemplate {
    base: BaseIdentity,
    atoms: Vec<Atom>,
}

impl BaseTemplate {
    /// Base identity this template describes
    pub fn base(&self) -> BaseIdentity { self.base }

    /// All atoms of this template
    pub fn atoms(&self) -> &[Atom] { &self.atoms }

    /// Finds a template atom by its (trimmed) name
    pub fn atom(&self, name: &str) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.name == name.trim())
    }

    /// Position of the named template atom
    pub fn atom_position(&self, name: &str) -> Option<Vec3> {
        self.atom(name).map(|a| a.pos)
    }

    /// Returns the (name, position) pairs of the base ring atoms present in this template,
    /// in base perimeter order
    pub fn ring_atoms(&self) -> Vec<(&str, Vec3)> {
        let names: &[&str] = if self.base.is_purine() { &PURINE_RING_ATOMS } else { &PYRIMIDINE_RING_ATOMS };
        names.iter()
            .filter_map(|n| self.atom(n).map(|a| (a.name.as_str(), a.pos)))
            .collect()
    }
}

/// Loads and caches the canonical base coordinate sets.
///
/// For each base identity two template variants are addressable: the standard one,
/// stored as `Atomic_X.pdb` (uppercase one-letter code), and the modified-nucleotide
/// variant stored as `Atomic.x.pdb` (lowercase). All fourteen files are read once when
/// the library is opened; a missing or empty file aborts initialization, so no partial
/// analysis is ever attempted. The loaded library is immutable and can be shared
/// across threads.
///
/// # Example
/// ```no_run
/// use nucpair_structure::{BaseIdentity, TemplateLibrary};
/// let templates = TemplateLibrary::open("resources/templates").unwrap();
/// let guanine = templates.template(BaseIdentity::Guanine, false);
/// assert_eq!(guanine.ring_atoms().len(), 9);
/// ```
pub struct TemplateLibrary {
    directory: PathBuf,
    templates: HashMap<(BaseIdentity, bool), Arc<BaseTemplate>>,
}

impl TemplateLibrary {
    /// Opens a template directory, reading all base templates into the cache
    pub fn open<P: AsRef<Path>>(directory: P) -> Result<TemplateLibrary, StructureError> {
        let directory = directory.as_ref().to_path_buf();
        let mut templates = HashMap::new();
        for base in BaseIdentity::ALL {
            for is_modified in [false, true] {
                let path = directory.join(Self::file_name(base, is_modified));
                let template = Self::read_template(base, &path)?;
                templates.insert((base, is_modified), Arc::new(template));
            }
        }
        debug!("loaded {} base templates from {:?}", templates.len(), &directory);
        return Ok(TemplateLibrary { directory, templates });
    }

    /// Returns the template file name for a base and variant, e.g. `Atomic_G.pdb`
    /// for standard guanine and `Atomic.g.pdb` for its modified variant
    pub fn file_name(base: BaseIdentity, is_modified: bool) -> String {
        let code = base.one_letter_code();
        if is_modified {
            format!("Atomic.{}.pdb", code.to_ascii_lowercase())
        } else {
            format!("Atomic_{}.pdb", code.to_ascii_uppercase())
        }
    }

    /// Returns the cached template of a base.
    ///
    /// All templates are loaded up front, so the lookup itself cannot fail.
    pub fn template(&self, base: BaseIdentity, is_modified: bool) -> Arc<BaseTemplate> {
        Arc::clone(&self.templates[&(base, is_modified)])
    }

    /// Directory this library was loaded from
    pub fn directory(&self) -> &Path { &self.directory }

    fn read_template(base: BaseIdentity, path: &Path) -> Result<BaseTemplate, StructureError> {
        if !path.is_file() {
            return Err(StructureError::TemplateNotFound { path: path.to_path_buf() });
        }
        let content = fs::read_to_string(path)
            .map_err(|e| StructureError::Io { path: path.to_path_buf(), source: e })?;
        let mut atoms = vec![];
        for line in content.lines() {
            if line.starts_with("ATOM") || line.starts_with("HETATM") {
                atoms.push(Atom::from_atom_line(line)?);
            }
        }
        if atoms.is_empty() {
            return Err(StructureError::TemplateEmpty { path: path.to_path_buf() });
        }
        return Ok(BaseTemplate { base, atoms });
    }
}
