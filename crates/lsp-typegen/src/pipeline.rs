//! The generation pipeline: filter, lower, render.

use crate::config::GenerateConfig;
use crate::error::Error;
use crate::ir::{
    LoweredAlias, LoweredEnumValue, LoweredEnumeration, LoweredMethod, LoweredModel,
    LoweredProperty, LoweredStructure, MethodKind,
};
use crate::lower::{LowerOptions, TypeLowerer};
use crate::naming::export_name;
use crate::output::Output;
use crate::registry::get_renderer;
use crate::resolve::DependencyResolver;
use crate::target::{BaseCategory, TargetProfile};
use crate::traits::Renderer;
use lsp_metamodel::{
    Enumeration, MessageDirection, MetaModel, ModelIndex, Property, Structure, Type,
};
use std::collections::{BTreeSet, HashSet};

/// Whether a definition survives the proposed flag and the type filter.
pub fn should_include(
    name: &str,
    proposed: bool,
    filter: Option<&BTreeSet<String>>,
    include_proposed: bool,
) -> bool {
    if proposed && !include_proposed {
        return false;
    }
    filter.is_none_or(|names| names.contains(name))
}

/// Lower every kept definition of `model` for `profile`.
///
/// Definitions are emitted in schema order. Methods are only lowered when
/// no type filter is active, since a filtered run generates types alone.
pub fn lower_model(model: &MetaModel, config: &GenerateConfig, profile: &TargetProfile) -> LoweredModel {
    let index = model.index();
    let requested = config.requested_types();
    let filter = if config.resolve_deps {
        DependencyResolver::new(&index, config.include_proposed).resolve(requested.as_ref())
    } else {
        requested
    };
    let include =
        |name: &str, proposed: bool| should_include(name, proposed, filter.as_ref(), config.include_proposed);

    let options = LowerOptions {
        include_proposed: config.include_proposed,
        type_overrides: config.type_overrides.clone(),
    };
    let mut lowerer = TypeLowerer::new(&index, profile, options);

    let structures: Vec<LoweredStructure> = model
        .structures
        .iter()
        .filter(|s| include(&s.name, s.proposed))
        .map(|s| lower_structure(&mut lowerer, &index, s, config.include_proposed))
        .collect();

    let enumerations: Vec<LoweredEnumeration> = model
        .enumerations
        .iter()
        .filter(|e| include(&e.name, e.proposed))
        .map(|e| lower_enumeration(profile, e, config.include_proposed))
        .collect();

    let aliases: Vec<LoweredAlias> = model
        .type_aliases
        .iter()
        .filter(|a| include(&a.name, a.proposed))
        .map(|a| LoweredAlias {
            schema_name: a.name.clone(),
            ident: profile.naming.type_name(&a.name),
            target: lowerer.lower(&a.ty),
            documentation: a.documentation.clone(),
            deprecated: a.deprecated.clone(),
        })
        .collect();

    let methods = if filter.is_none() && (config.generate_client || config.generate_server) {
        lower_methods(&mut lowerer, model, config)
    } else {
        Vec::new()
    };

    let composites = lowerer.into_composites();
    tracing::debug!(
        target_profile = %profile.name,
        structures = structures.len(),
        enumerations = enumerations.len(),
        aliases = aliases.len(),
        methods = methods.len(),
        composites = composites.len(),
        "lowered model"
    );

    LoweredModel {
        version: model.meta_data.version.clone(),
        target: profile.name.clone(),
        structures,
        enumerations,
        aliases,
        methods,
        composites,
    }
}

fn lower_structure(
    lowerer: &mut TypeLowerer<'_>,
    index: &ModelIndex<'_>,
    structure: &Structure,
    include_proposed: bool,
) -> LoweredStructure {
    let properties = flatten_properties(index, structure, include_proposed)
        .into_iter()
        .filter(|p| include_proposed || !p.proposed)
        .map(|p| LoweredProperty {
            name: p.name.clone(),
            ty: lowerer.lower(&p.ty),
            optional: p.optional,
            documentation: p.documentation.clone(),
            deprecated: p.deprecated.clone(),
        })
        .collect();

    LoweredStructure {
        schema_name: structure.name.clone(),
        ident: lowerer.profile().naming.type_name(&structure.name),
        properties,
        documentation: structure.documentation.clone(),
        since: structure.since.clone(),
        deprecated: structure.deprecated.clone(),
    }
}

/// Properties of `structure` with `extends` and `mixins` folded in.
///
/// Parents come first, in declaration order, then the structure's own
/// properties. A property redeclared later replaces the earlier one in
/// place. Proposed parents are skipped unless `include_proposed` is set.
pub fn flatten_properties<'m>(
    index: &ModelIndex<'m>,
    structure: &'m Structure,
    include_proposed: bool,
) -> Vec<&'m Property> {
    let mut seen = HashSet::new();
    let mut properties = Vec::new();
    collect_properties(index, structure, include_proposed, &mut seen, &mut properties);
    properties
}

fn collect_properties<'m>(
    index: &ModelIndex<'m>,
    structure: &'m Structure,
    include_proposed: bool,
    seen: &mut HashSet<&'m str>,
    out: &mut Vec<&'m Property>,
) {
    if !seen.insert(structure.name.as_str()) {
        return;
    }
    for parent in structure.extends.iter().chain(&structure.mixins) {
        let Type::Reference(name) = parent else {
            continue;
        };
        match index.structure(name) {
            Some(parent) if parent.proposed && !include_proposed => {
                tracing::trace!(structure = %structure.name, parent = %name, "skipping proposed parent");
            }
            Some(parent) => collect_properties(index, parent, include_proposed, seen, out),
            None => tracing::trace!(structure = %structure.name, parent = %name, "parent is not a structure"),
        }
    }
    for property in &structure.properties {
        match out.iter_mut().find(|p| p.name == property.name) {
            Some(slot) => *slot = property,
            None => out.push(property),
        }
    }
}

fn lower_enumeration(
    profile: &TargetProfile,
    enumeration: &Enumeration,
    include_proposed: bool,
) -> LoweredEnumeration {
    let category = match &enumeration.ty {
        Type::Base(base) => BaseCategory::of(base),
        _ => BaseCategory::Any,
    };
    let values = enumeration
        .values
        .iter()
        .filter(|v| include_proposed || !v.proposed)
        .map(|v| LoweredEnumValue {
            name: v.name.clone(),
            ident: export_name(&v.name),
            value: v.value.clone(),
            documentation: v.documentation.clone(),
        })
        .collect();

    LoweredEnumeration {
        schema_name: enumeration.name.clone(),
        ident: profile.naming.type_name(&enumeration.name),
        category,
        spelling: profile.base.get(category).spelling.clone(),
        values,
        supports_custom_values: enumeration.supports_custom_values,
        documentation: enumeration.documentation.clone(),
        deprecated: enumeration.deprecated.clone(),
    }
}

fn lower_methods(lowerer: &mut TypeLowerer<'_>, model: &MetaModel, config: &GenerateConfig) -> Vec<LoweredMethod> {
    let placement = |direction: MessageDirection| {
        (
            config.generate_server && direction.to_server(),
            config.generate_client && direction.to_client(),
        )
    };
    let mut methods = Vec::new();

    for request in &model.requests {
        if request.proposed && !config.include_proposed {
            continue;
        }
        let (server, client) = placement(request.direction);
        if !server && !client {
            continue;
        }
        methods.push(LoweredMethod {
            method: request.method.clone(),
            ident: crate::naming::method_ident(&request.method),
            kind: MethodKind::Request,
            direction: request.direction,
            server,
            client,
            params: request.params.as_ref().map(|t| lowerer.lower(t)),
            result: request.result.as_ref().map(|t| lowerer.lower(t)),
            partial_result: request.partial_result.as_ref().map(|t| lowerer.lower(t)),
            registration_method: request.registration_method.clone(),
            documentation: request.documentation.clone(),
        });
    }

    for notification in &model.notifications {
        if notification.proposed && !config.include_proposed {
            continue;
        }
        let (server, client) = placement(notification.direction);
        if !server && !client {
            continue;
        }
        methods.push(LoweredMethod {
            method: notification.method.clone(),
            ident: crate::naming::method_ident(&notification.method),
            kind: MethodKind::Notification,
            direction: notification.direction,
            server,
            client,
            params: notification.params.as_ref().map(|t| lowerer.lower(t)),
            result: None,
            partial_result: None,
            registration_method: notification.registration_method.clone(),
            documentation: notification.documentation.clone(),
        });
    }

    methods
}

/// Lower `model` and render it with `renderer`.
pub fn generate(model: &MetaModel, config: &GenerateConfig, renderer: &dyn Renderer) -> Result<Output, Error> {
    let profile = renderer.profile(config)?;
    tracing::debug!(renderer = renderer.name(), target_profile = %profile.name, "generating");
    let lowered = lower_model(model, config, &profile);
    Ok(renderer.render(&lowered, config)?)
}

/// Parse a schema document and render it with the renderer named by
/// `config.renderer`.
pub fn generate_from_slice(document: &[u8], config: &GenerateConfig) -> Result<Output, Error> {
    let renderer =
        get_renderer(&config.renderer).ok_or_else(|| Error::UnknownRenderer(config.renderer.clone()))?;
    let model = lsp_metamodel::parse(document)?;
    generate(&model, config, renderer)
}
