use crate::{
    error::ConfigError,
    fieldset::{Fieldset, FieldsetOptions, FieldsetTable},
    model::Model,
    scope::{ScopeIndex, ScopeRegistrar},
    subset::{SubsetDef, SubsetOptions, SubsetTable},
    types::{FieldId, FieldsetId, GroupId, ScopeId, SubsetId},
};

///
/// ModelBuilder
///
/// Accumulates fieldset and subset declarations for one owning type.
/// Each subset is resolved eagerly, in declaration order, against the
/// tables declared so far; `build` freezes the result into an immutable
/// [`Model`]. There is no ambient global registry: the builder is the
/// explicit declaration context, constructed once per owning type.
///

#[derive(Default)]
pub struct ModelBuilder<'r> {
    fieldsets: FieldsetTable,
    subsets: SubsetTable,
    scopes: ScopeIndex,
    registrar: Option<&'r mut dyn ScopeRegistrar>,
}

impl<'r> ModelBuilder<'r> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the host collaborator that installs scope filters. It is
    /// called during `declare_subset` each time a scope's membership grows.
    #[must_use]
    pub fn with_registrar(mut self, registrar: &'r mut dyn ScopeRegistrar) -> Self {
        self.registrar = Some(registrar);
        self
    }

    /// Register or overwrite a fieldset. Malformed identifiers fail fast.
    pub fn declare_fieldset(
        &mut self,
        id: &str,
        fields: &[&str],
        options: FieldsetOptions,
    ) -> Result<(), ConfigError> {
        let id = FieldsetId::new(id)?;
        let fields = fields
            .iter()
            .map(FieldId::new)
            .collect::<Result<Vec<_>, _>>()?;

        self.fieldsets.insert(Fieldset {
            id,
            fields,
            opt_in: options.opt_in,
        });

        Ok(())
    }

    /// Declare and resolve a subset against the tables declared so far.
    ///
    /// Malformed identifiers anywhere in the directives and re-declaration
    /// of an existing subset id are fatal. References to subsets or
    /// fieldsets that do not exist yet are pruned silently.
    pub fn declare_subset(&mut self, id: &str, options: SubsetOptions) -> Result<(), ConfigError> {
        let id = SubsetId::new(id)?;
        if self.subsets.contains_any(id.as_str()) {
            return Err(ConfigError::DuplicateSubset { id });
        }

        let directives = Directives::try_new(options)?;
        let def = self.resolve(id, directives);

        // Template subsets keep their scopes for inheritance but never join
        // the index and never reach the registrar.
        if !def.template {
            for scope in &def.scopes {
                self.scopes.append(scope, &def.id);
                if let Some(registrar) = self.registrar.as_deref_mut() {
                    registrar.register(scope, self.scopes.members(scope.as_str()));
                }
            }
        }

        self.subsets.insert(def);

        Ok(())
    }

    /// Freeze the accumulated declarations into an immutable snapshot.
    #[must_use]
    pub fn build(self) -> Model {
        Model::new(self.fieldsets, self.subsets, self.scopes)
    }

    // Resolution order per directive set:
    // baseline -> only -> except -> add -> prune -> dedupe -> materialize.
    fn resolve(&self, id: SubsetId, directives: Directives) -> SubsetDef {
        let mut scopes: Vec<ScopeId> = Vec::new();
        let mut inherited_group: Option<GroupId> = None;

        // 1. baseline
        let mut baseline = if directives.extends.is_empty() {
            match directives.fieldsets {
                Some(explicit) => explicit,
                None => self.fieldsets.default_ids(),
            }
        } else {
            let mut inherited: Vec<FieldsetId> = Vec::new();
            for parent_id in &directives.extends {
                // not-yet-declared parents are a silent no-op
                let Some(parent) = self.subsets.get_any(parent_id.as_str()) else {
                    continue;
                };
                union_into(&mut inherited, parent.fieldsets.iter().cloned());
                union_into(&mut scopes, parent.scopes.iter().cloned());
                if inherited_group.is_none() {
                    inherited_group.clone_from(&parent.group);
                }
            }
            // an explicit fieldset list replaces the inherited baseline
            directives.fieldsets.unwrap_or(inherited)
        };

        // the current declaration always wins over inherited keys; scopes
        // merge by union instead
        let group = directives.group.or(inherited_group);
        union_into(&mut scopes, directives.scopes);

        // 2. restrict
        if let Some(only) = &directives.only {
            baseline.retain(|f| only.contains(f));
        }

        // 3. exclude
        if let Some(except) = &directives.except {
            baseline.retain(|f| !except.contains(f));
        }

        // 4. augment; runs after restrict/exclude so additions bypass both
        union_into(&mut baseline, directives.add);

        // 5. prune references to undeclared fieldsets
        baseline.retain(|f| self.fieldsets.contains(f.as_str()));

        // 6. dedupe, first occurrence wins
        dedupe(&mut baseline);

        // 8. materialize the resolved field list
        let fields = self.fieldsets.materialize(&baseline);

        SubsetDef {
            id,
            fieldsets: baseline,
            fields,
            group,
            scopes,
            template: directives.template,
        }
    }
}

///
/// Directives
/// Validated form of `SubsetOptions`; the transient keys live only here and
/// are consumed by resolution.
///

struct Directives {
    extends: Vec<SubsetId>,
    add: Vec<FieldsetId>,
    only: Option<Vec<FieldsetId>>,
    except: Option<Vec<FieldsetId>>,
    fieldsets: Option<Vec<FieldsetId>>,
    scopes: Vec<ScopeId>,
    group: Option<GroupId>,
    template: bool,
}

impl Directives {
    fn try_new(options: SubsetOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            extends: validate_ids(options.extends)?,
            add: validate_ids(options.add)?,
            only: options.only.map(validate_ids).transpose()?,
            except: options.except.map(validate_ids).transpose()?,
            fieldsets: options.fieldsets.map(validate_ids).transpose()?,
            scopes: validate_ids(options.scopes)?,
            group: options.group.as_deref().map(GroupId::new).transpose()?,
            template: options.template,
        })
    }
}

fn validate_ids<T: std::str::FromStr<Err = ConfigError>>(
    ids: Vec<String>,
) -> Result<Vec<T>, ConfigError> {
    ids.iter().map(|id| id.parse()).collect()
}

fn union_into<T: PartialEq>(dst: &mut Vec<T>, src: impl IntoIterator<Item = T>) {
    for item in src {
        if !dst.contains(&item) {
            dst.push(item);
        }
    }
}

fn dedupe<T: PartialEq>(items: &mut Vec<T>) {
    let mut index = 0;
    while index < items.len() {
        if items[..index].contains(&items[index]) {
            items.remove(index);
        } else {
            index += 1;
        }
    }
}
