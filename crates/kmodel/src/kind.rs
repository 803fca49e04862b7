use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Type name prefixes that never carry a stable simple name.
const UNNAMED_PREFIXES: [&str; 10] =
    ["(", "[", "&", "*", "!", "dyn ", "fn(", "impl ", "unsafe ", "extern "];

/// Identity of a Rust type as seen by the registry.
///
/// Equality and hashing use the [`TypeId`] only; the type name is carried along for
/// diagnostics and for deriving the model class id.
#[derive(Clone, Copy)]
pub struct ClassKind {
    type_id: TypeId,
    type_name: &'static str,
}

impl ClassKind {
    /// Returns the identity of `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self { type_id: TypeId::of::<T>(), type_name: std::any::type_name::<T>() }
    }

    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified type name as reported by the compiler.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type name with every path reduced to its last segment, generic arguments
    /// included: `app::Page<alloc::string::String>` becomes `Page<String>`.
    ///
    /// Distinct instantiations of a generic type therefore get distinct names.
    /// Returns `None` for types without a stable name: closures and other compiler
    /// generated types, tuples, arrays, slices, references, pointers, function pointers,
    /// trait objects and the never type.
    ///
    /// ```rust
    /// use kmodel::ClassKind;
    ///
    /// struct Invoice;
    ///
    /// assert_eq!(ClassKind::of::<Invoice>().simple_name().as_deref(), Some("Invoice"));
    /// assert_eq!(ClassKind::of::<Vec<Invoice>>().simple_name().as_deref(), Some("Vec<Invoice>"));
    /// assert_eq!(ClassKind::of::<(u8, u8)>().simple_name(), None);
    /// ```
    #[must_use]
    pub fn simple_name(&self) -> Option<Cow<'static, str>> {
        let name = self.type_name.trim();
        if name.is_empty()
            || name.contains("{{")
            || UNNAMED_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
        {
            return None;
        }

        if !name.contains('<') {
            let simple = last_segment(name);
            return (!simple.is_empty()).then_some(Cow::Borrowed(simple));
        }

        let mut simple = String::with_capacity(name.len());
        let mut path_start = None;
        for (at, ch) in name.char_indices() {
            let in_path = ch.is_alphanumeric() || ch == '_' || ch == ':';
            match (in_path, path_start) {
                (true, None) => path_start = Some(at),
                (false, Some(start)) => {
                    simple.push_str(last_segment(&name[start..at]));
                    path_start = None;
                    simple.push(ch);
                },
                (false, None) => simple.push(ch),
                (true, Some(_)) => {},
            }
        }
        if let Some(start) = path_start {
            simple.push_str(last_segment(&name[start..]));
        }

        (!simple.starts_with('<')).then_some(Cow::Owned(simple))
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path).trim()
}

impl PartialEq for ClassKind {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ClassKind {}

impl Hash for ClassKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClassKind").field(&self.type_name).finish()
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// Identity of a field: the owning type plus the field name.
///
/// Two descriptors with the same key describe the same underlying field, whatever
/// functions they use to reach it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldKey {
    owner: ClassKind,
    name: &'static str,
}

impl FieldKey {
    #[must_use]
    pub fn of<T: ?Sized + 'static>(name: &'static str) -> Self {
        Self { owner: ClassKind::of::<T>(), name }
    }

    #[must_use]
    pub const fn owner(&self) -> ClassKind {
        self.owner
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner.simple_name() {
            Some(owner) => write!(f, "{owner}.{}", self.name),
            None => write!(f, "{}.{}", self.owner.type_name, self.name),
        }
    }
}
