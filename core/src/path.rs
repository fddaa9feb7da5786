//! Declaration paths for violation reporting.
//!
//! A path names the declaration a violation is attributed to, starting from
//! the validated type's root: a field, a method parameter, a return value,
//! or an element of a list-valued field.

use std::fmt;

/// One segment of a declaration path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named field on the type.
    Field(String),
    /// A method on the type.
    Method(String),
    /// A method parameter, by name and position.
    Parameter { name: String, index: usize },
    /// The method's return value.
    ReturnValue,
    /// An element of a list-valued field.
    Index(usize),
}

/// The path from a type root to a constrained declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    root: String,
    segments: Vec<PathSegment>,
}

impl Path {
    /// Start a path at a type root.
    pub fn root(type_name: impl Into<String>) -> Self {
        Self {
            root: type_name.into(),
            segments: Vec::new(),
        }
    }

    /// Append a field segment.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Field(name.into()));
        self
    }

    /// Append a method segment.
    pub fn method(mut self, name: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Method(name.into()));
        self
    }

    /// Append a parameter segment.
    pub fn parameter(mut self, name: impl Into<String>, index: usize) -> Self {
        self.segments.push(PathSegment::Parameter {
            name: name.into(),
            index,
        });
        self
    }

    /// Append a return-value segment.
    pub fn return_value(mut self) -> Self {
        self.segments.push(PathSegment::ReturnValue);
        self
    }

    /// Append a list-element segment.
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(PathSegment::Index(index));
        self
    }

    /// The type name the path starts at.
    pub fn type_name(&self) -> &str {
        &self.root
    }

    /// All segments after the root.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// The last segment, if any.
    pub fn leaf(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Method(name) => write!(f, ".{}", name)?,
                PathSegment::Parameter { name, .. } => write!(f, ".{}", name)?,
                PathSegment::ReturnValue => write!(f, ".<return value>")?,
                PathSegment::Index(i) => write!(f, "[{}]", i)?,
            }
        }
        Ok(())
    }
}
