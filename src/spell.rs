use std::mem::swap;

const SUGGESTIONS: usize = 3;

/// Edit distance with two reusable rows.
pub struct Spell(Vec<usize>, Vec<usize>);

impl Spell {
    pub const fn new() -> Self {
        Self(Vec::new(), Vec::new())
    }

    /// The closest candidates to `word`, nearest first.
    pub fn suggest<'c>(
        &mut self,
        word: &str,
        candidates: impl IntoIterator<Item = &'c str>,
    ) -> Vec<String> {
        let maximum = (word.chars().count() / 3).clamp(1, 3);
        let mut found = Vec::new();
        for candidate in candidates {
            let distance = self.distance(word, candidate);
            if distance <= maximum {
                found.push((distance, candidate));
            }
        }
        found.sort();
        found.dedup();
        found
            .into_iter()
            .take(SUGGESTIONS)
            .map(|(_, candidate)| candidate.to_owned())
            .collect()
    }

    fn distance(&mut self, left: &str, right: &str) -> usize {
        let left = left.chars().map(|letter| letter.to_ascii_lowercase()).collect::<Vec<_>>();
        let Self(previous, current) = self;
        previous.clear();
        previous.extend(0..=left.len());
        current.clear();
        current.resize(left.len() + 1, 0);

        for (i, right) in right.chars().map(|letter| letter.to_ascii_lowercase()).enumerate() {
            current[0] = i + 1;
            for (j, &left) in left.iter().enumerate() {
                let substitute = previous[j] + usize::from(left != right);
                current[j + 1] = substitute.min(previous[j + 1] + 1).min(current[j] + 1);
            }
            swap(previous, current);
        }
        previous[left.len()]
    }
}
