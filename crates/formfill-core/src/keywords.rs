//! Keyword sets and the built-in catalogue.

use formfill_protocols::ScalarField;

/// Ordered lowercase substrings used to classify an element's purpose.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        )
    }

    /// Whether `text` contains any keyword, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.0.iter().any(|keyword| text.contains(keyword.as_str()))
    }

    /// The first keyword contained in `text`, for diagnostics.
    pub fn first_hit(&self, text: &str) -> Option<&str> {
        let text = text.to_lowercase();
        self.0
            .iter()
            .find(|keyword| text.contains(keyword.as_str()))
            .map(String::as_str)
    }

    pub fn keywords(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Keywords for one repeated section and its sub-fields.
#[derive(Debug, Clone)]
pub struct SectionKeywords {
    /// Human-readable section name used in diagnostics.
    pub name: &'static str,
    pub section: KeywordSet,
    /// Sub-field name (profile wire name) and its keywords, in fill order.
    pub fields: Vec<(&'static str, KeywordSet)>,
}

/// Every keyword set the fill pass uses.
#[derive(Debug, Clone)]
pub struct KeywordCatalog {
    /// Scalar fields in fill order.
    pub scalar_fields: Vec<(ScalarField, KeywordSet)>,
    pub work: SectionKeywords,
    pub education: SectionKeywords,
}

impl KeywordCatalog {
    pub fn scalar(&self, field: ScalarField) -> Option<&KeywordSet> {
        self.scalar_fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, keywords)| keywords)
    }
}

impl Default for KeywordCatalog {
    fn default() -> Self {
        let scalar_fields = vec![
            (
                ScalarField::FirstName,
                KeywordSet::new(["first name", "firstname", "fname", "given-name"]),
            ),
            (
                ScalarField::LastName,
                KeywordSet::new(["last name", "lastname", "lname", "surname", "family-name"]),
            ),
            (ScalarField::Email, KeywordSet::new(["email"])),
            (ScalarField::Phone, KeywordSet::new(["phone", "mobile", "tel"])),
            (ScalarField::Linkedin, KeywordSet::new(["linkedin"])),
            (ScalarField::Github, KeywordSet::new(["github"])),
            (
                ScalarField::Portfolio,
                KeywordSet::new(["portfolio", "website", "url"]),
            ),
            (
                ScalarField::CoverLetter,
                KeywordSet::new([
                    "cover letter",
                    "cover-letter",
                    "additional information",
                    "summary",
                ]),
            ),
        ];

        let start_date = KeywordSet::new(["start date", "from"]);
        let end_date = KeywordSet::new(["end date", "to"]);

        let work = SectionKeywords {
            name: "work experience",
            section: KeywordSet::new(["experience", "work", "employment"]),
            fields: vec![
                ("title", KeywordSet::new(["title", "position"])),
                ("company", KeywordSet::new(["company", "employer"])),
                (
                    "responsibilities",
                    KeywordSet::new(["responsibilities", "duties", "description", "summary"]),
                ),
                ("startDate", start_date.clone()),
                ("endDate", end_date.clone()),
            ],
        };

        let education = SectionKeywords {
            name: "education",
            section: KeywordSet::new(["education", "school", "university", "academic"]),
            fields: vec![
                ("school", KeywordSet::new(["school", "university", "institution"])),
                ("degree", KeywordSet::new(["degree"])),
                (
                    "fieldOfStudy",
                    KeywordSet::new(["field of study", "major", "discipline"]),
                ),
                ("startDate", start_date),
                ("endDate", end_date),
            ],
        };

        Self {
            scalar_fields,
            work,
            education,
        }
    }
}
