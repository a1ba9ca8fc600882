use anyhow::{anyhow, Context};
use app11core::records::{ReportKind, SerialNumber};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Serial numbers handed out per area and task, kept across invocations.
///
/// Stored as `{"<area>": {"<task>": [numbers]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumberCache {
    areas: BTreeMap<String, BTreeMap<String, Vec<u32>>>,
}

/// Serial numbers chosen for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// One number per report kind present in the parameters, in lifecycle order.
    pub numbers: Vec<(ReportKind, SerialNumber)>,
    /// Numbers to store for the pair, when the cache did not hold them yet.
    pub record: Option<Vec<u32>>,
}

impl Allocation {
    /// Numbers of the requested kinds, keeping each kind's lifecycle slot.
    pub fn select(&self, kinds: &[ReportKind]) -> Vec<(ReportKind, SerialNumber)> {
        self.numbers
            .iter()
            .filter(|(kind, _)| kinds.contains(kind))
            .copied()
            .collect()
    }
}

impl NumberCache {
    /// Loads the cache; a missing or empty file is an empty cache.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            debug!("no number cache at {}, starting empty", path_ref.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading number cache {}", path_ref.display()))?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let cache: NumberCache = serde_json::from_str(&contents)
            .with_context(|| format!("parsing number cache {}", path_ref.display()))?;
        debug!("number cache: {:?}", cache.areas);
        Ok(cache)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path_ref = path.as_ref();
        let contents = serde_json::to_string_pretty(self).context("serializing number cache")?;
        fs::write(path_ref, contents)
            .with_context(|| format!("writing number cache {}", path_ref.display()))
    }

    pub fn numbers(&self, area: &str, task: &str) -> Option<&[u32]> {
        self.areas
            .get(area)
            .and_then(|tasks| tasks.get(task))
            .map(Vec::as_slice)
    }

    /// Numbers every present kind by its lifecycle slot.
    ///
    /// A known pair reuses its stored numbers; slots it has no number for yet
    /// continue after the highest number handed out so far. `start` numbers
    /// the slots consecutively instead.
    pub fn allocate(
        &self,
        area: &str,
        task: &str,
        present: &[ReportKind],
        start: Option<u32>,
    ) -> anyhow::Result<Allocation> {
        let cached = self.numbers(area, task).unwrap_or_default();
        let (mut numbers, mut next) = match start {
            Some(first) => (Vec::new(), Some(first)),
            None => (
                cached.iter().take(present.len()).copied().collect::<Vec<u32>>(),
                self.highest().checked_add(1),
            ),
        };
        while numbers.len() < present.len() {
            let number = next.ok_or_else(|| anyhow!("serial numbers exhausted for {area}-{task}"))?;
            numbers.push(number);
            next = number.checked_add(1);
        }

        let record = match start {
            Some(_) if cached.is_empty() => Some(numbers.clone()),
            None if cached.len() < present.len() => Some(numbers.clone()),
            _ => None,
        };
        let numbers = present
            .iter()
            .zip(&numbers)
            .map(|(&kind, &number)| {
                SerialNumber::new(number)
                    .map(|serial| (kind, serial))
                    .with_context(|| format!("numbering the {} report", kind))
            })
            .collect::<anyhow::Result<_>>()?;
        Ok(Allocation { numbers, record })
    }

    fn highest(&self) -> u32 {
        self.areas
            .values()
            .flat_map(|tasks| tasks.values())
            .flatten()
            .copied()
            .max()
            .unwrap_or(0)
    }

    pub fn record(&mut self, area: &str, task: &str, numbers: Vec<u32>) {
        self.areas
            .entry(area.to_string())
            .or_default()
            .insert(task.to_string(), numbers);
    }
}
