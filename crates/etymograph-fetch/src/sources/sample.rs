//! Built-in sample records, the last resort of the source chain

use std::collections::HashMap;

use etymograph_core::Word;

use crate::source::{FetchError, WordSource};

pub struct SampleSource {
    records: HashMap<String, Word>,
}

impl SampleSource {
    pub fn new() -> Self {
        let records = sample_records()
            .into_iter()
            .map(|record| (record.lookup_key(), record))
            .collect();
        Self { records }
    }

    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.records.values()
    }
}

impl Default for SampleSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl WordSource for SampleSource {
    async fn fetch_root(&self, term: &str) -> Result<Option<Word>, FetchError> {
        Ok(self.records.get(term).cloned())
    }

    fn name(&self) -> &str {
        "sample"
    }
}

fn sample_records() -> Vec<Word> {
    vec![
        Word::new("etymology", "English")
            .with_year(1398)
            .with_definition("The study of the origin of words and the way their meanings have changed.")
            .with_etymology(vec![
                Word::new("etymologie", "Old French").with_year(1300),
                Word::new("etymologia", "Latin").with_year(1350),
            ])
            .with_roots(vec![
                Word::new("etymologia", "Latin")
                    .with_year(1350)
                    .with_definition("analysis of a word to find its true origin")
                    .with_roots(vec![
                        Word::new("etymon", "Greek")
                            .with_year(-400)
                            .with_definition("true sense")
                            .with_roots(vec![Word::new("etymos", "Greek").with_definition("true, real")]),
                        Word::new("logia", "Greek")
                            .with_year(-400)
                            .with_definition("study of"),
                    ]),
            ]),
        Word::new("world", "English")
            .with_year(725)
            .with_definition("The earth, together with all of its countries and peoples.")
            .with_etymology(vec![Word::new("weorold", "Old English").with_year(725)])
            .with_roots(vec![
                Word::new("wer", "Proto-Germanic")
                    .with_definition("man")
                    .with_roots(vec![Word::new("wiHrós", "Proto-Indo-European").with_definition("man")]),
                Word::new("ald", "Proto-Germanic").with_definition("age, life"),
            ]),
        Word::new("mundane", "English")
            .with_year(1475)
            .with_definition("Lacking interest or excitement; of this earthly world.")
            .with_etymology(vec![Word::new("mondain", "Old French").with_year(1300)])
            .with_roots(vec![
                Word::new("mundanus", "Late Latin")
                    .with_year(400)
                    .with_definition("belonging to the world")
                    .with_roots(vec![Word::new("mundus", "Latin").with_definition("world, universe")]),
                Word::new("mundus", "Latin").with_definition("clean, elegant"),
            ]),
        Word::new("philosophy", "English")
            .with_year(1300)
            .with_definition("The study of the fundamental nature of knowledge, reality, and existence.")
            .with_etymology(vec![
                Word::new("filosofie", "Old French").with_year(1200),
                Word::new("philosophia", "Latin"),
            ])
            .with_roots(vec![
                Word::new("philosophia", "Greek").with_year(-400).with_roots(vec![
                    Word::new("philos", "Greek").with_definition("loving"),
                    Word::new("sophia", "Greek")
                        .with_definition("knowledge, wisdom")
                        .with_roots(vec![Word::new("sophos", "Greek").with_definition("wise")]),
                ]),
            ]),
        Word::new("democracy", "English")
            .with_year(1570)
            .with_definition("Government by the people.")
            .with_etymology(vec![
                Word::new("démocratie", "French").with_year(1500),
                Word::new("democratia", "Medieval Latin"),
            ])
            .with_roots(vec![
                Word::new("dēmokratia", "Greek").with_year(-450).with_roots(vec![
                    Word::new("dēmos", "Greek").with_definition("common people"),
                    Word::new("kratos", "Greek").with_definition("rule, strength"),
                ]),
            ]),
    ]
}
