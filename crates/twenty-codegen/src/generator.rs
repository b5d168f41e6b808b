//! Source generation for one entity definition.

use std::collections::BTreeSet;
use std::fmt::Write;

use tracing::debug;
use twenty_codec::CodecRegistry;
use twenty_metadata::{is_updatable_field, EntityDefinition, FieldMetadata, RelationMetadata};

use crate::error::Result;
use crate::naming;
use crate::types::AccessorType;

/// Crate path generated code imports from by default.
pub const DEFAULT_CRATE_PATH: &str = "twenty_api";

/// Generated source for one object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedEntity {
    pub object_name: String,
    pub module_name: String,
    pub type_name: String,
    /// `use` lines shared by the three parts.
    pub imports: String,
    /// Entity type plus its baked metadata table.
    pub entity: String,
    /// Typed collection wrapper.
    pub collection: String,
    /// Typed service wrapper.
    pub service: String,
}

impl GeneratedEntity {
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.module_name)
    }

    /// The complete module file.
    pub fn to_source(&self) -> String {
        format!(
            "// @generated by twenty-codegen from the `{}` object metadata. Do not edit.\n\n#![allow(unused_imports)]\n\n{}\n{}\n{}\n{}",
            self.object_name, self.imports, self.entity, self.collection, self.service
        )
    }
}

/// Compiles entity definitions into Rust source.
#[derive(Debug, Clone)]
pub struct EntityGenerator {
    crate_path: String,
}

impl Default for EntityGenerator {
    fn default() -> Self {
        Self::new()
    }
}

struct FieldPlan<'a> {
    field: &'a FieldMetadata,
    accessor: AccessorType,
    getter: String,
    setter: Option<String>,
}

impl EntityGenerator {
    pub fn new() -> Self {
        Self {
            crate_path: DEFAULT_CRATE_PATH.to_string(),
        }
    }

    /// Import generated code's dependencies from `path` instead of `twenty_api`.
    pub fn with_crate_path(mut self, path: impl Into<String>) -> Self {
        self.crate_path = path.into();
        self
    }

    pub fn generate(&self, definition: &EntityDefinition) -> Result<GeneratedEntity> {
        let object_name = definition.object_name();
        let type_name = naming::type_name(object_name)?;
        let module_name = naming::module_name(object_name)?;
        let metadata_const = naming::metadata_const(object_name)?;

        let registry = CodecRegistry::global();
        let plans = definition
            .fields()
            .iter()
            .map(|field| {
                Ok(FieldPlan {
                    field,
                    accessor: AccessorType::for_field_type(field.field_type, registry),
                    getter: naming::getter_name(&field.name)?,
                    setter: if is_updatable_field(&field.name, field.is_system) {
                        Some(naming::setter_name(&field.name)?)
                    } else {
                        None
                    },
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            object = object_name,
            fields = plans.len(),
            setters = plans.iter().filter(|p| p.setter.is_some()).count(),
            "Generating entity source"
        );

        Ok(GeneratedEntity {
            object_name: object_name.to_string(),
            imports: self.render_imports(&plans)?,
            entity: render_entity(definition, &plans, &type_name, &metadata_const)?,
            collection: render_collection(&type_name)?,
            service: render_service(&type_name, &metadata_const)?,
            module_name,
            type_name,
        })
    }

    /// `mod.rs` declaring every generated module and re-exporting its types.
    pub fn render_mod_file(&self, entities: &[GeneratedEntity]) -> Result<String> {
        let mut out = String::from("// @generated by twenty-codegen. Do not edit.\n\n");
        for entity in entities {
            writeln!(out, "pub mod {};", entity.module_name)?;
        }
        out.push('\n');
        for entity in entities {
            let t = &entity.type_name;
            writeln!(
                out,
                "pub use {}::{{{t}, {t}Collection, {t}Service}};",
                entity.module_name
            )?;
        }
        Ok(out)
    }

    fn render_imports(&self, plans: &[FieldPlan<'_>]) -> Result<String> {
        let root = &self.crate_path;
        let mut codec_types = BTreeSet::new();
        for plan in plans {
            match plan.accessor {
                AccessorType::Codec(name) => {
                    codec_types.insert(name);
                }
                AccessorType::Untyped => {
                    codec_types.insert("FieldValue");
                }
                _ => {}
            }
        }

        let mut out = String::new();
        writeln!(out, "use {root}::client::Transport;")?;
        if !codec_types.is_empty() {
            let list: Vec<_> = codec_types.into_iter().collect();
            writeln!(out, "use {root}::codec::{{{}}};", list.join(", "))?;
        }
        writeln!(
            out,
            "use {root}::metadata::{{FieldType, RelationType, StaticEntityMetadata, StaticEnumOption, StaticField, StaticRelation}};"
        )?;
        writeln!(
            out,
            "use {root}::rest::{{Entity, EntityCollection, EntityService, FindOptions, Result}};"
        )?;
        Ok(out)
    }
}

fn lit(s: &str) -> String {
    format!("{s:?}")
}

fn doc_line(text: &str) -> String {
    text.lines().next().unwrap_or("").trim().to_string()
}

fn render_entity(
    definition: &EntityDefinition,
    plans: &[FieldPlan<'_>],
    type_name: &str,
    metadata_const: &str,
) -> Result<String> {
    let mut out = String::new();
    render_metadata_table(&mut out, definition, metadata_const)?;

    writeln!(out, "/// `{}` record.", definition.object_name())?;
    writeln!(out, "#[derive(Debug, Clone)]")?;
    writeln!(out, "pub struct {type_name} {{")?;
    writeln!(out, "    entity: Entity,")?;
    writeln!(out, "}}\n")?;

    writeln!(out, "impl {type_name} {{")?;
    writeln!(out, "    pub fn new() -> Self {{")?;
    writeln!(out, "        Self {{ entity: Entity::new(&{metadata_const}) }}")?;
    writeln!(out, "    }}\n")?;
    writeln!(out, "    pub fn from_entity(entity: Entity) -> Self {{")?;
    writeln!(out, "        Self {{ entity }}")?;
    writeln!(out, "    }}\n")?;
    writeln!(out, "    pub fn entity(&self) -> &Entity {{")?;
    writeln!(out, "        &self.entity")?;
    writeln!(out, "    }}\n")?;
    writeln!(out, "    pub fn entity_mut(&mut self) -> &mut Entity {{")?;
    writeln!(out, "        &mut self.entity")?;
    writeln!(out, "    }}\n")?;
    writeln!(out, "    pub fn into_entity(self) -> Entity {{")?;
    writeln!(out, "        self.entity")?;
    writeln!(out, "    }}")?;

    if !plans.iter().any(|p| p.getter == "id") {
        writeln!(out)?;
        writeln!(out, "    pub fn id(&self) -> Option<&str> {{")?;
        writeln!(out, "        self.entity.id()")?;
        writeln!(out, "    }}")?;
    }

    for plan in plans {
        let name = lit(&plan.field.name);
        let label = doc_line(&plan.field.label);
        writeln!(out)?;
        if !label.is_empty() {
            writeln!(out, "    /// {label}")?;
        }
        writeln!(
            out,
            "    pub fn {}(&self) -> {} {{",
            plan.getter,
            plan.accessor.getter_type()
        )?;
        match plan.accessor {
            AccessorType::Untyped => writeln!(out, "        self.entity.get({name})")?,
            _ => writeln!(out, "        self.entity.get_typed({name})")?,
        }
        writeln!(out, "    }}")?;

        if let Some(setter) = &plan.setter {
            writeln!(out)?;
            writeln!(
                out,
                "    pub fn {setter}(&mut self, value: {}) -> &mut Self {{",
                plan.accessor.setter_param()
            )?;
            writeln!(
                out,
                "        self.entity.set({name}, {});",
                plan.accessor.setter_value()
            )?;
            writeln!(out, "        self")?;
            writeln!(out, "    }}")?;
        }
    }
    writeln!(out, "}}\n")?;

    writeln!(out, "impl Default for {type_name} {{")?;
    writeln!(out, "    fn default() -> Self {{")?;
    writeln!(out, "        Self::new()")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}\n")?;
    writeln!(out, "impl From<Entity> for {type_name} {{")?;
    writeln!(out, "    fn from(entity: Entity) -> Self {{")?;
    writeln!(out, "        Self::from_entity(entity)")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}\n")?;
    writeln!(out, "impl From<{type_name}> for Entity {{")?;
    writeln!(out, "    fn from(record: {type_name}) -> Self {{")?;
    writeln!(out, "        record.entity")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    Ok(out)
}

fn render_metadata_table(
    out: &mut String,
    definition: &EntityDefinition,
    metadata_const: &str,
) -> Result<()> {
    writeln!(out, "pub static {metadata_const}: StaticEntityMetadata = StaticEntityMetadata {{")?;
    writeln!(out, "    object_name: {},", lit(definition.object_name()))?;
    writeln!(out, "    object_name_plural: {},", lit(definition.object_name_plural()))?;
    writeln!(out, "    endpoint: {},", lit(definition.endpoint()))?;

    writeln!(out, "    fields: &[")?;
    for field in definition.fields() {
        writeln!(out, "        StaticField {{")?;
        writeln!(out, "            name: {},", lit(&field.name))?;
        writeln!(out, "            wire_name: {},", lit(&field.wire_name()))?;
        writeln!(out, "            field_type: FieldType::{:?},", field.field_type)?;
        writeln!(out, "            label: {},", lit(&field.label))?;
        writeln!(out, "            is_nullable: {},", field.is_nullable)?;
        writeln!(out, "            is_custom: {},", field.is_custom)?;
        writeln!(out, "            is_system: {},", field.is_system)?;
        if field.options().is_empty() {
            writeln!(out, "            options: &[],")?;
        } else {
            writeln!(out, "            options: &[")?;
            for option in field.options() {
                writeln!(
                    out,
                    "                StaticEnumOption {{ value: {}, label: {}, color: {}, position: {} }},",
                    lit(&option.value),
                    lit(&option.label),
                    lit(&option.color),
                    option.position
                )?;
            }
            writeln!(out, "            ],")?;
        }
        writeln!(out, "        }},")?;
    }
    writeln!(out, "    ],")?;

    let standard: Vec<String> = definition
        .standard_field_names()
        .into_iter()
        .map(lit)
        .collect();
    writeln!(out, "    standard_fields: &[{}],", standard.join(", "))?;

    let mut relations: Vec<&RelationMetadata> = definition.relations().collect();
    relations.sort_by(|a, b| a.name.cmp(&b.name));
    writeln!(out, "    relations: &[")?;
    for relation in relations {
        writeln!(
            out,
            "        StaticRelation {{ name: {}, relation_type: RelationType::{:?}, source_object: {}, target_object: {}, target_field: {} }},",
            lit(&relation.name),
            relation.relation_type,
            lit(&relation.source_object),
            lit(&relation.target_object),
            lit(&relation.target_field)
        )?;
    }
    writeln!(out, "    ],")?;

    let mut pairs = definition.field_to_api_pairs();
    pairs.sort_unstable();
    let forward: Vec<String> = pairs
        .iter()
        .map(|(field, wire)| format!("({}, {})", lit(field), lit(wire)))
        .collect();
    let mut flipped: Vec<(&str, &str)> =
        pairs.iter().map(|&(field, wire)| (wire, field)).collect();
    flipped.sort_unstable();
    let reverse: Vec<String> = flipped
        .iter()
        .map(|(wire, field)| format!("({}, {})", lit(wire), lit(field)))
        .collect();
    writeln!(out, "    field_to_api: &[{}],", forward.join(", "))?;
    writeln!(out, "    api_to_field: &[{}],", reverse.join(", "))?;
    writeln!(out, "}};\n")?;
    Ok(())
}

fn render_collection(type_name: &str) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "/// Typed page of [`{type_name}`] records.")?;
    writeln!(out, "#[derive(Debug)]")?;
    writeln!(out, "pub struct {type_name}Collection<T> {{")?;
    writeln!(out, "    inner: EntityCollection<T>,")?;
    writeln!(out, "}}\n")?;

    writeln!(out, "impl<T> {type_name}Collection<T> {{")?;
    writeln!(out, "    pub fn from_inner(inner: EntityCollection<T>) -> Self {{")?;
    writeln!(out, "        Self {{ inner }}")?;
    writeln!(out, "    }}\n")?;
    writeln!(out, "    pub fn inner(&self) -> &EntityCollection<T> {{")?;
    writeln!(out, "        &self.inner")?;
    writeln!(out, "    }}\n")?;
    writeln!(out, "    pub fn len(&self) -> usize {{")?;
    writeln!(out, "        self.inner.len()")?;
    writeln!(out, "    }}\n")?;
    writeln!(out, "    pub fn is_empty(&self) -> bool {{")?;
    writeln!(out, "        self.inner.is_empty()")?;
    writeln!(out, "    }}\n")?;
    writeln!(out, "    pub fn total_count(&self) -> Option<u64> {{")?;
    writeln!(out, "        self.inner.total_count()")?;
    writeln!(out, "    }}\n")?;
    writeln!(out, "    pub fn has_more(&self) -> bool {{")?;
    writeln!(out, "        self.inner.has_more()")?;
    writeln!(out, "    }}\n")?;
    writeln!(out, "    pub fn ids(&self) -> Vec<&str> {{")?;
    writeln!(out, "        self.inner.ids()")?;
    writeln!(out, "    }}\n")?;
    writeln!(out, "    /// Loaded records.")?;
    writeln!(out, "    pub fn to_vec(&self) -> Vec<{type_name}> {{")?;
    writeln!(
        out,
        "        self.inner.iter().cloned().map({type_name}::from_entity).collect()"
    )?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}\n")?;

    writeln!(out, "impl<T: Transport> {type_name}Collection<T> {{")?;
    writeln!(out, "    /// Next record, fetching another page when needed.")?;
    writeln!(out, "    pub async fn next_record(&mut self) -> Option<{type_name}> {{")?;
    writeln!(
        out,
        "        self.inner.next_entity().await.cloned().map({type_name}::from_entity)"
    )?;
    writeln!(out, "    }}\n")?;
    writeln!(out, "    /// Every record, loading the remaining pages.")?;
    writeln!(out, "    pub async fn load_all(&mut self) -> Vec<{type_name}> {{")?;
    writeln!(
        out,
        "        self.inner.load_all().await.iter().cloned().map({type_name}::from_entity).collect()"
    )?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    Ok(out)
}

fn render_service(type_name: &str, metadata_const: &str) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "/// Typed CRUD access to [`{type_name}`] records.")?;
    writeln!(out, "#[derive(Debug, Clone)]")?;
    writeln!(out, "pub struct {type_name}Service<T> {{")?;
    writeln!(out, "    inner: EntityService<T>,")?;
    writeln!(out, "}}\n")?;

    writeln!(out, "impl<T: Transport + Clone> {type_name}Service<T> {{")?;
    writeln!(out, "    pub fn new(transport: T) -> Self {{")?;
    writeln!(
        out,
        "        Self {{ inner: EntityService::new(transport, &{metadata_const}) }}"
    )?;
    writeln!(out, "    }}\n")?;
    writeln!(out, "    pub fn inner(&self) -> &EntityService<T> {{")?;
    writeln!(out, "        &self.inner")?;
    writeln!(out, "    }}\n")?;
    writeln!(
        out,
        "    pub async fn find(&self, filter: &str, options: FindOptions) -> Result<{type_name}Collection<T>> {{"
    )?;
    writeln!(
        out,
        "        Ok({type_name}Collection::from_inner(self.inner.find(filter, options).await?))"
    )?;
    writeln!(out, "    }}\n")?;
    writeln!(
        out,
        "    pub async fn get_by_id(&self, id: &str) -> Result<Option<{type_name}>> {{"
    )?;
    writeln!(
        out,
        "        Ok(self.inner.get_by_id(id).await?.map({type_name}::from_entity))"
    )?;
    writeln!(out, "    }}\n")?;
    writeln!(
        out,
        "    pub async fn create(&self, record: &{type_name}) -> Result<{type_name}> {{"
    )?;
    writeln!(
        out,
        "        self.inner.create(record.entity()).await.map({type_name}::from_entity)"
    )?;
    writeln!(out, "    }}\n")?;
    writeln!(
        out,
        "    pub async fn update(&self, record: &{type_name}) -> Result<{type_name}> {{"
    )?;
    writeln!(
        out,
        "        self.inner.update(record.entity()).await.map({type_name}::from_entity)"
    )?;
    writeln!(out, "    }}\n")?;
    writeln!(out, "    pub async fn delete(&self, id: &str) -> Result<bool> {{")?;
    writeln!(out, "        self.inner.delete(id).await")?;
    writeln!(out, "    }}\n")?;
    writeln!(
        out,
        "    pub async fn batch_upsert(&self, records: &[{type_name}]) -> Result<Vec<{type_name}>> {{"
    )?;
    writeln!(
        out,
        "        let entities: Vec<Entity> = records.iter().map(|r| r.entity().clone()).collect();"
    )?;
    writeln!(out, "        let saved = self.inner.batch_upsert(&entities).await?;")?;
    writeln!(
        out,
        "        Ok(saved.into_iter().map({type_name}::from_entity).collect())"
    )?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    Ok(out)
}
