//! Generalization: the widest type of the same kind.

use super::Type;

impl Type {
    /// Drop every parameter, keeping only the kind.
    ///
    /// Aliases generalize their resolved target; the result never contains
    /// an alias, so generalizing twice changes nothing.
    #[must_use]
    pub fn generalize(&self) -> Type {
        match self.resolved() {
            Type::Integer { .. } => Type::integer(),
            Type::Float { .. } => Type::float(),
            Type::String { .. } => Type::string(),
            Type::Regexp(_) => Type::regexp(),
            Type::Array { .. } => Type::array(Type::Any),
            Type::Hash { .. } => Type::hash(Type::Any, Type::Any),
            Type::Collection { .. } => Type::collection(),
            Type::Iterator(_) => Type::iterator(None),
            Type::TypeOf(_) => Type::type_of(None),
            Type::Runtime { .. } => Type::runtime("", ""),
            Type::Resource { .. } => Type::resource(None, None),
            Type::Class { .. } => Type::class(None),
            other => other.clone(),
        }
    }
}
