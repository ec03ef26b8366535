//! Export organization: flat per-variant type lists into the grouped,
//! deterministically ordered structure the docs UI consumes.

use docsmith_types::{Export, TypesMeta, TypesSourceData, VariantTypes};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

/// Fixed ordering for the trailing segment of additional-type names.
const SUFFIX_PRIORITY: [&str; 4] = ["Props", "State", "DataAttributes", "CssVars"];

/// Fixed ordering for export keys in namespaced documents.
const EXPORT_PRIORITY: [&str; 12] = [
    "Root",
    "Provider",
    "Trigger",
    "Portal",
    "Backdrop",
    "Positioner",
    "Popup",
    "Arrow",
    "Viewport",
    "Item",
    "Panel",
    "Indicator",
];

/// Group per-variant type lists into exports and additional types.
///
/// `variant_maps` carries the per-variant slices of the canonical name map
/// when the caller already knows them (the parser reads them from the footer);
/// otherwise they are derived by scoping `type_name_map` to each variant's
/// type list.
pub fn organize(
    variant_data: &[VariantTypes],
    type_name_map: &IndexMap<String, String>,
    variant_maps: Option<&IndexMap<String, IndexMap<String, String>>>,
) -> TypesSourceData {
    let deduped = dedupe_across_variants(variant_data);
    let main_names: FxHashSet<String> = deduped
        .values()
        .filter(|meta| !meta.is_raw())
        .map(|meta| meta.name().to_string())
        .collect();

    // Primary documentables become exports keyed by their last name segment.
    let mut exports: IndexMap<String, Export> = IndexMap::new();
    for meta in deduped.values() {
        if meta.is_raw() {
            continue;
        }
        let key = last_segment(meta.name()).to_string();
        exports.entry(key).or_insert_with(|| Export {
            type_meta: meta.clone(),
            additional_types: Vec::new(),
        });
    }

    // Raw aliases attach to the export their dotted name points at.
    let mut additional_types: Vec<TypesMeta> = Vec::new();
    for meta in deduped.values() {
        if !meta.is_raw() {
            continue;
        }
        match owner_key(meta.name(), &main_names, &exports) {
            Some(owner) => {
                if let Some(export) = exports.get_mut(&owner) {
                    export.additional_types.push(meta.clone());
                } else {
                    additional_types.push(meta.clone());
                }
            }
            None => additional_types.push(meta.clone()),
        }
    }

    for export in exports.values_mut() {
        sort_by_suffix(&mut export.additional_types);
    }
    sort_by_suffix(&mut additional_types);
    let all_names: FxHashSet<String> = deduped.keys().cloned().collect();
    filter_top_level(&mut additional_types, type_name_map, &all_names);
    sort_exports(&mut exports, &main_names);

    let variant_type_names = collect_variant_names(variant_data);
    let variant_type_name_maps = match variant_maps {
        Some(maps) => maps.clone(),
        None => scope_name_map(type_name_map, &variant_type_names),
    };

    TypesSourceData {
        exports,
        additional_types,
        external_types: IndexMap::new(),
        type_name_map: type_name_map.clone(),
        variant_type_names,
        variant_type_name_maps,
    }
}

/// One entry per type name across all variants. A component/hook/function
/// beats a bare alias under the same name; between entries of equal standing
/// the last seen wins.
fn dedupe_across_variants(variant_data: &[VariantTypes]) -> IndexMap<String, TypesMeta> {
    let mut deduped: IndexMap<String, TypesMeta> = IndexMap::new();
    for variant in variant_data {
        for meta in &variant.types {
            match deduped.get(meta.name()) {
                Some(existing) if !existing.is_raw() && meta.is_raw() => {}
                _ => {
                    deduped.insert(meta.name().to_string(), meta.clone());
                }
            }
        }
    }
    deduped
}

/// Which export key owns a raw alias, if any.
fn owner_key(
    name: &str,
    main_names: &FxHashSet<String>,
    exports: &IndexMap<String, Export>,
) -> Option<String> {
    let parts: Vec<&str> = name.split('.').collect();
    match parts.len() {
        0 | 1 => None,
        2 => {
            // `Prefix.Suffix` is a standalone type when it coincides with a
            // known main-type name; otherwise it belongs to `Prefix`.
            if main_names.contains(name) {
                None
            } else if exports.contains_key(parts[0]) {
                Some(parts[0].to_string())
            } else {
                None
            }
        }
        n => Some(parts[n - 2].to_string()),
    }
}

fn last_segment(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

fn suffix_rank(name: &str) -> usize {
    let suffix = last_segment(name);
    SUFFIX_PRIORITY
        .iter()
        .position(|candidate| *candidate == suffix)
        .unwrap_or(SUFFIX_PRIORITY.len())
}

fn sort_by_suffix(types: &mut [TypesMeta]) {
    types.sort_by(|a, b| {
        suffix_rank(a.name())
            .cmp(&suffix_rank(b.name()))
            .then_with(|| a.name().cmp(b.name()))
    });
}

fn export_rank(key: &str) -> usize {
    EXPORT_PRIORITY
        .iter()
        .position(|candidate| *candidate == key)
        .unwrap_or(EXPORT_PRIORITY.len())
}

fn sort_exports(exports: &mut IndexMap<String, Export>, main_names: &FxHashSet<String>) {
    let namespaced = main_names.iter().any(|name| name.contains('.'));
    if namespaced {
        exports.sort_by(|key_a, _, key_b, _| {
            export_rank(key_a)
                .cmp(&export_rank(key_b))
                .then_with(|| key_a.cmp(key_b))
        });
    } else {
        exports.sort_by(|key_a, _, key_b, _| key_a.cmp(key_b));
    }
}

/// Drop top-level aliases that are shadowed by a namespaced equivalent.
fn filter_top_level(
    additional_types: &mut Vec<TypesMeta>,
    type_name_map: &IndexMap<String, String>,
    all_names: &FxHashSet<String>,
) {
    additional_types.retain(|meta| {
        let name = meta.name();
        if name.contains('.') {
            return true;
        }
        // The canonical map knows a namespaced version of this flat name.
        if let Some(dotted) = type_name_map.get(name) {
            if dotted.contains('.') && all_names.contains(dotted) {
                return false;
            }
        }
        // A namespaced name with the same trailing segment already exists.
        let dotted_suffix = format!(".{name}");
        !all_names
            .iter()
            .any(|candidate| candidate.ends_with(&dotted_suffix))
    });
}

fn collect_variant_names(variant_data: &[VariantTypes]) -> IndexMap<String, Vec<String>> {
    let mut variant_type_names: IndexMap<String, Vec<String>> = IndexMap::new();
    for variant in variant_data {
        if variant.variant.is_empty() {
            continue;
        }
        let names = variant_type_names
            .entry(variant.variant.clone())
            .or_default();
        for meta in &variant.types {
            if !names.iter().any(|name| name == meta.name()) {
                names.push(meta.name().to_string());
            }
        }
    }
    variant_type_names
}

/// Scope the global canonical map to each variant by membership of the dotted
/// (or flat) name in the variant's type list.
fn scope_name_map(
    type_name_map: &IndexMap<String, String>,
    variant_type_names: &IndexMap<String, Vec<String>>,
) -> IndexMap<String, IndexMap<String, String>> {
    let mut scoped: IndexMap<String, IndexMap<String, String>> = IndexMap::new();
    for (variant, names) in variant_type_names {
        let map = scoped.entry(variant.clone()).or_default();
        for (flat, dotted) in type_name_map {
            if names.contains(dotted) || names.contains(flat) {
                map.insert(flat.clone(), dotted.clone());
            }
        }
    }
    scoped
}
