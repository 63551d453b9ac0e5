use crate::ast::{FieldId, NodeId};
use crc32fast::Hasher;

/// Derive a session seed from an arbitrary name using CRC32
pub fn get_session_id(name: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator shared by every node and field of a session.
///
/// Node and field IDs are drawn from the same counter, so no two entities
/// created through one generator ever collide.
#[derive(Debug)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(name: &str) -> Self {
        Self {
            seed: get_session_id(name),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn next_node_id(&mut self) -> NodeId {
        NodeId::new(self.new_id())
    }

    pub fn next_field_id(&mut self) -> FieldId {
        FieldId::new(self.new_id())
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of IDs issued so far
    pub fn issued(&self) -> u64 {
        self.count
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("prooftree")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_generation() {
        let id1 = get_session_id("session-a");
        let id2 = get_session_id("session-a");
        assert_eq!(id1, id2);

        let id3 = get_session_id("session-b");
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::new("test");

        let node = gen.next_node_id();
        let field = gen.next_field_id();
        let raw = gen.new_id();

        assert!(node.as_str().ends_with("-1"));
        assert!(field.as_str().ends_with("-2"));
        assert!(raw.ends_with("-3"));
        assert_eq!(gen.issued(), 3);

        let seed = gen.seed().to_string();
        assert!(node.as_str().starts_with(&seed));
        assert!(field.as_str().starts_with(&seed));
    }
}
