//! Relationship edges between schemas.
//!
//! An edge is created for every schema field that references another
//! schema, either through a typed identifier with a `ref` (the
//! [`ReferenceMechanism::ForeignKey`] mechanism) or by nesting another
//! schema's shape directly (the [`ReferenceMechanism::Embedded`] mechanism).

use std::fmt;

use serde::Serialize;

/// Cardinality and mechanism of a relationship, as a single label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    /// A single foreign key.
    OneToOne,
    /// An array of foreign keys.
    OneToMany,
    /// A single embedded sub-document.
    EmbeddedOne,
    /// An array of embedded sub-documents.
    EmbeddedMany,
}

impl RelationKind {
    /// Returns `true` when the kind carries the "many" qualifier.
    pub fn is_many(self) -> bool {
        matches!(self, Self::OneToMany | Self::EmbeddedMany)
    }
}

impl From<RelationKind> for &'static str {
    fn from(val: RelationKind) -> Self {
        match val {
            RelationKind::OneToOne => "one-to-one",
            RelationKind::OneToMany => "one-to-many",
            RelationKind::EmbeddedOne => "embedded-one",
            RelationKind::EmbeddedMany => "embedded-many",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// How the referencing field points at its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReferenceMechanism {
    /// A typed identifier field naming the target's registered model.
    ForeignKey,
    /// The target schema's shape nested inside the field.
    Embedded,
}

impl From<ReferenceMechanism> for &'static str {
    fn from(val: ReferenceMechanism) -> Self {
        match val {
            ReferenceMechanism::ForeignKey => "ForeignKey",
            ReferenceMechanism::Embedded => "Embedded",
        }
    }
}

impl fmt::Display for ReferenceMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// A directed edge from the schema owning `field` to the schema named `to`.
///
/// `to` is not required to name an existing schema; unresolved targets
/// are kept so analysis can report them as broken references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipEdge {
    from: String,
    to: String,
    field: String,
    kind: RelationKind,
    reference_mechanism: ReferenceMechanism,
    deletion_risk: bool,
}

impl RelationshipEdge {
    /// Creates a foreign-key edge. Such edges always carry deletion risk.
    ///
    /// # Panics
    ///
    /// Debug builds assert that `kind` is one of the foreign-key kinds.
    pub fn foreign_key(
        from: impl Into<String>,
        to: impl Into<String>,
        field: impl Into<String>,
        kind: RelationKind,
    ) -> Self {
        debug_assert!(matches!(
            kind,
            RelationKind::OneToOne | RelationKind::OneToMany
        ));
        Self {
            from: from.into(),
            to: to.into(),
            field: field.into(),
            kind,
            reference_mechanism: ReferenceMechanism::ForeignKey,
            deletion_risk: true,
        }
    }

    /// Creates an embedded edge. Embedded edges never carry deletion risk.
    pub fn embedded(
        from: impl Into<String>,
        to: impl Into<String>,
        field: impl Into<String>,
        many: bool,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            field: field.into(),
            kind: if many {
                RelationKind::EmbeddedMany
            } else {
                RelationKind::EmbeddedOne
            },
            reference_mechanism: ReferenceMechanism::Embedded,
            deletion_risk: false,
        }
    }

    /// Display name of the schema owning the field.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Display name of the referenced schema, possibly unresolved.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Name of the field carrying the reference.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn reference_mechanism(&self) -> ReferenceMechanism {
        self.reference_mechanism
    }

    /// Returns `true` when deleting the target may leave dangling references.
    pub fn deletion_risk(&self) -> bool {
        self.deletion_risk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_kind_labels() {
        for kind in [
            RelationKind::OneToOne,
            RelationKind::OneToMany,
            RelationKind::EmbeddedOne,
            RelationKind::EmbeddedMany,
        ] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.to_string());
        }
        assert_eq!(RelationKind::EmbeddedMany.to_string(), "embedded-many");
    }

    #[test]
    fn test_is_many() {
        assert!(RelationKind::OneToMany.is_many());
        assert!(RelationKind::EmbeddedMany.is_many());
        assert!(!RelationKind::OneToOne.is_many());
        assert!(!RelationKind::EmbeddedOne.is_many());
    }

    #[test]
    fn test_foreign_key_carries_deletion_risk() {
        let edge = RelationshipEdge::foreign_key("Post", "User", "author", RelationKind::OneToOne);
        assert!(edge.deletion_risk());
        assert_eq!(edge.reference_mechanism(), ReferenceMechanism::ForeignKey);
    }

    #[test]
    fn test_embedded_has_no_deletion_risk() {
        let edge = RelationshipEdge::embedded("User", "Address", "addresses", true);
        assert!(!edge.deletion_risk());
        assert_eq!(edge.kind(), RelationKind::EmbeddedMany);
        assert_eq!(edge.reference_mechanism(), ReferenceMechanism::Embedded);
    }

    #[test]
    fn test_edge_serialization() {
        let edge = RelationshipEdge::foreign_key("Post", "User", "author", RelationKind::OneToOne);
        let json = serde_json::to_string(&edge).unwrap();
        assert_eq!(
            json,
            r#"{"from":"Post","to":"User","field":"author","kind":"one-to-one","referenceMechanism":"ForeignKey","deletionRisk":true}"#
        );
    }
}
