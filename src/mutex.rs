use crate::flag::Flag;

/// All flags of a flag set sharing a mutex group name.
#[derive(Debug)]
pub struct MutexGroup<'s, 'a> {
    name: &'s str,
    flags: Vec<&'s Flag<'a>>,
}

impl<'s, 'a> MutexGroup<'s, 'a> {
    /// Collects the groups of `flags` in order of first appearance.
    pub(crate) fn collect(flags: &'s [Flag<'a>]) -> Vec<Self> {
        let mut groups: Vec<Self> = Vec::new();
        for flag in flags {
            for name in flag.groups() {
                match groups.iter_mut().find(|group| group.name == name.as_str()) {
                    Some(group) => group.flags.push(flag),
                    None => groups.push(MutexGroup {
                        name,
                        flags: vec![flag],
                    }),
                }
            }
        }
        groups
    }

    pub const fn name(&self) -> &'s str {
        self.name
    }

    pub fn flags(&self) -> &[&'s Flag<'a>] {
        &self.flags
    }

    pub fn names(&self) -> Vec<String> {
        self.flags.iter().map(|flag| flag.name()).collect()
    }

    pub fn specified(&self) -> usize {
        self.flags.iter().filter(|flag| flag.was_specified()).count()
    }

    pub fn is_obligatory(&self) -> bool {
        self.flags.iter().any(|flag| flag.is_obligatory())
    }

    pub fn was_specified(&self) -> bool {
        self.specified() > 0
    }

    /// At most one member was specified.
    pub fn is_valid(&self) -> bool {
        self.specified() <= 1
    }
}
