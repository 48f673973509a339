//! Palettes command: list every palette name the registry resolves

use foldplot_core::{PaletteFamily, PaletteRegistry};

/// Palette names grouped by family, in registry order
pub fn grouped_names(registry: &PaletteRegistry) -> Vec<(PaletteFamily, Vec<String>)> {
    let mut groups: Vec<(PaletteFamily, Vec<String>)> = Vec::new();
    for (family, name) in registry.names() {
        match groups.last_mut() {
            Some((current, names)) if *current == family => names.push(name),
            _ => groups.push((family, vec![name])),
        }
    }
    groups
}

pub fn execute() {
    let registry = PaletteRegistry::builtin();
    for (family, names) in grouped_names(&registry) {
        println!("{} ({}):", family, names.len());
        for line in names.chunks(6) {
            println!("  {}", line.join("  "));
        }
    }
}
