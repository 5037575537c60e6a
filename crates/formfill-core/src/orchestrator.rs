//! Fill orchestration.
//!
//! Phases run unconditionally in sequence; a failure inside a phase is
//! recorded against the item that caused it and the phase carries on.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use formfill_protocols::{ElementId, FillError, LearnedMappings, Page, Profile, ProfileKey};

use crate::keywords::{KeywordCatalog, SectionKeywords};
use crate::mapping_store::MappingStore;
use crate::matcher::{find_by_keywords, ControlKinds};
use crate::report::{FillReport, FillSource, FilledField};
use crate::sections::detect_containers;
use crate::writer::{describe, write_value};

/// States of a fill pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPhase {
    ApplyingLearnedMappings,
    FillingScalarFields,
    FillingWorkExperience,
    FillingEducation,
    Done,
}

impl FillPhase {
    pub fn next(self) -> Self {
        match self {
            FillPhase::ApplyingLearnedMappings => FillPhase::FillingScalarFields,
            FillPhase::FillingScalarFields => FillPhase::FillingWorkExperience,
            FillPhase::FillingWorkExperience => FillPhase::FillingEducation,
            FillPhase::FillingEducation | FillPhase::Done => FillPhase::Done,
        }
    }
}

impl std::fmt::Display for FillPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FillPhase::ApplyingLearnedMappings => "Custom Mappings (Learned Fields)",
            FillPhase::FillingScalarFields => "Personal Info (Keyword Search)",
            FillPhase::FillingWorkExperience => "Work Experience",
            FillPhase::FillingEducation => "Education",
            FillPhase::Done => "Finished",
        };
        f.write_str(name)
    }
}

/// Runs fill passes against one page.
pub struct FormFiller {
    page: Arc<dyn Page>,
    mappings: Arc<MappingStore>,
    catalog: KeywordCatalog,
}

impl FormFiller {
    pub fn new(page: Arc<dyn Page>, mappings: Arc<MappingStore>) -> Self {
        Self::with_catalog(page, mappings, KeywordCatalog::default())
    }

    pub fn with_catalog(
        page: Arc<dyn Page>,
        mappings: Arc<MappingStore>,
        catalog: KeywordCatalog,
    ) -> Self {
        Self {
            page,
            mappings,
            catalog,
        }
    }

    /// Fill the page from `profile`.
    ///
    /// Always runs to completion. A storage failure while loading learned
    /// mappings is recorded and the pass continues without them.
    pub async fn fill(&self, profile: &Profile) -> FillReport {
        let mut pass = FillPass::new(self.page.as_ref());
        let learned = match self.mappings.load().await {
            Ok(mappings) => Some(mappings),
            Err(e) => {
                warn!("Could not load learned mappings: {}", e);
                pass.report.diagnostics.push(e);
                None
            }
        };

        let mut phase = FillPhase::ApplyingLearnedMappings;
        while phase != FillPhase::Done {
            info!("--- Starting {} ---", phase);
            match phase {
                FillPhase::ApplyingLearnedMappings => {
                    if let Some(mappings) = &learned {
                        pass.apply_learned(mappings, profile);
                    }
                }
                FillPhase::FillingScalarFields => pass.fill_scalars(&self.catalog, profile),
                FillPhase::FillingWorkExperience => {
                    let entries: Vec<_> =
                        profile.work_experience.iter().map(|job| job.fields()).collect();
                    pass.fill_section(&self.catalog.work, &self.catalog.education, &entries);
                }
                FillPhase::FillingEducation => {
                    let entries: Vec<_> =
                        profile.education.iter().map(|edu| edu.fields()).collect();
                    pass.fill_section(&self.catalog.education, &self.catalog.work, &entries);
                }
                FillPhase::Done => {}
            }
            phase = phase.next();
        }

        info!(
            "--- {}: {} field(s) written, {} diagnostic(s) ---",
            FillPhase::Done,
            pass.report.filled.len(),
            pass.report.diagnostics.len()
        );
        pass.report
    }
}

/// State of one fill invocation: the filled set and the report.
struct FillPass<'p> {
    page: &'p dyn Page,
    filled: HashSet<ElementId>,
    report: FillReport,
}

impl<'p> FillPass<'p> {
    fn new(page: &'p dyn Page) -> Self {
        Self {
            page,
            filled: HashSet::new(),
            report: FillReport::default(),
        }
    }

    /// Write and register in the same step. Returns whether the write landed.
    fn write(&mut self, element: ElementId, value: &str, source: FillSource) -> bool {
        match write_value(self.page, Some(element), Some(value)) {
            Ok(true) => {
                self.filled.insert(element);
                self.report.filled.push(FilledField {
                    element,
                    label: describe(self.page, element),
                    value: value.to_string(),
                    source,
                });
                true
            }
            Ok(false) => false,
            Err(e) => {
                warn!("Write to {} failed: {}", element, e);
                self.report.diagnostics.push(e.into());
                false
            }
        }
    }

    fn apply_learned(&mut self, mappings: &LearnedMappings, profile: &Profile) {
        for (selector, raw_key) in mappings.iter() {
            let element = match self.page.query_selector(selector) {
                Ok(Some(element)) => element,
                Ok(None) => {
                    debug!("No element for learned selector {}", selector);
                    self.report
                        .diagnostics
                        .push(FillError::NoElementForSelector(selector.to_string()));
                    continue;
                }
                Err(e) => {
                    warn!("Skipping learned selector {}: {}", selector, e);
                    self.report.diagnostics.push(e.into());
                    continue;
                }
            };

            if self.filled.contains(&element) {
                debug!("{} already filled by an earlier learned mapping", selector);
                continue;
            }

            let Some(value) = ProfileKey::parse(raw_key).resolve(profile) else {
                debug!("Profile has no value for {}", raw_key);
                continue;
            };
            self.write(
                element,
                &value,
                FillSource::Learned {
                    selector: selector.to_string(),
                    profile_key: raw_key.to_string(),
                },
            );
        }
    }

    fn fill_scalars(&mut self, catalog: &KeywordCatalog, profile: &Profile) {
        for (field, keywords) in &catalog.scalar_fields {
            let Some(value) = profile.scalar(*field).filter(|v| !v.is_empty()) else {
                continue;
            };
            let candidates =
                match find_by_keywords(self.page, keywords, None, ControlKinds::TEXT_ENTRY) {
                    Ok(candidates) => candidates,
                    Err(e) => {
                        warn!("Keyword search for {} failed: {}", field, e);
                        self.report.diagnostics.push(e.into());
                        continue;
                    }
                };
            if let Some(element) = candidates.into_iter().find(|e| !self.filled.contains(e)) {
                self.write(element, value, FillSource::Keyword { field: *field });
            }
        }
    }

    fn fill_section(
        &mut self,
        section: &SectionKeywords,
        sibling: &SectionKeywords,
        entries: &[[(&'static str, Option<&str>); 5]],
    ) {
        if entries.is_empty() {
            return;
        }

        let containers = match detect_containers(self.page, &section.section, &sibling.section) {
            Ok(containers) => containers,
            Err(e) => {
                warn!("Container detection for {} failed: {}", section.name, e);
                self.report.diagnostics.push(e.into());
                return;
            }
        };
        info!(
            "Found {} potential {} containers.",
            containers.len(),
            section.name
        );

        for (index, entry) in entries.iter().enumerate() {
            let Some(&container) = containers.get(index) else {
                info!("No container found for {} item #{}", section.name, index + 1);
                self.report.diagnostics.push(FillError::NoContainerForItem {
                    section: section.name.to_string(),
                    index,
                });
                continue;
            };
            info!("Filling {} #{} within its container.", section.name, index + 1);
            self.fill_item(section, container, index, entry);
        }
    }

    /// Fill one list entry inside its container.
    ///
    /// Each sub-field takes the first keyword match in the container. Sub-fields
    /// are not mutually exclusive: when two keyword sets hit the same control,
    /// the later sub-field overwrites the earlier one. Controls claimed by an
    /// earlier phase are left alone.
    fn fill_item(
        &mut self,
        section: &SectionKeywords,
        container: ElementId,
        index: usize,
        entry: &[(&'static str, Option<&str>); 5],
    ) {
        let mut written_here: HashSet<ElementId> = HashSet::new();

        for (field, keywords) in &section.fields {
            let Some(value) = entry
                .iter()
                .find(|(name, _)| name == field)
                .and_then(|(_, value)| *value)
            else {
                continue;
            };

            let first = match find_by_keywords(
                self.page,
                keywords,
                Some(container),
                ControlKinds::TEXT_ENTRY,
            ) {
                Ok(matches) => matches.into_iter().next(),
                Err(e) => {
                    warn!("Keyword search for {} failed: {}", field, e);
                    self.report.diagnostics.push(e.into());
                    continue;
                }
            };
            let Some(element) = first else {
                continue;
            };

            if self.filled.contains(&element) && !written_here.contains(&element) {
                debug!(
                    "{} #{} {}: {} already filled by an earlier phase",
                    section.name,
                    index + 1,
                    field,
                    element
                );
                continue;
            }
            if written_here.contains(&element) {
                debug!(
                    "{} #{} {}: overwriting {} written by an earlier sub-field",
                    section.name,
                    index + 1,
                    field,
                    element
                );
            }

            let source = FillSource::SectionItem {
                section: section.name.to_string(),
                index,
                field: field.to_string(),
            };
            if self.write(element, value, source) {
                written_here.insert(element);
            }
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
