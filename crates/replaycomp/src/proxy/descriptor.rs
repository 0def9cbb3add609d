//! Static description of an interface's declared surface

use crate::proxy::SymbolicMethod;

/// One declared operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: &'static str,
    /// Simple parameter type names, in declaration order
    pub params: &'static [&'static str],
    /// Whether proxies route this operation through their handler; operations
    /// derived from other operations are not proxied
    pub proxied: bool,
}

impl MethodSignature {
    pub fn matches(&self, method: &SymbolicMethod) -> bool {
        self.name == method.name() && method.params().eq(self.params.iter().copied())
    }
}

/// Declared surface of an interface
#[derive(Debug)]
pub struct InterfaceDescriptor {
    pub name: &'static str,
    /// Operations declared by this interface itself
    pub methods: &'static [MethodSignature],
    /// Directly extended interfaces
    pub supers: &'static [&'static InterfaceDescriptor],
    /// Symbolic identities of the proxied operations declared here
    pub symbols: &'static [SymbolicMethod],
}

impl InterfaceDescriptor {
    /// Declared operation matching `method`, searching this interface first
    /// and then the inherited ones
    pub fn find(&self, method: &SymbolicMethod) -> Option<&'static MethodSignature> {
        self.methods
            .iter()
            .find(|signature| signature.matches(method))
            .or_else(|| self.supers.iter().find_map(|parent| parent.find(method)))
    }

    pub fn declares(&self, method: &SymbolicMethod) -> bool {
        self.find(method).is_some()
    }

    /// Whether this interface is `other` or extends it
    pub fn extends(&self, other: &InterfaceDescriptor) -> bool {
        self.name == other.name || self.supers.iter().any(|parent| parent.extends(other))
    }

    /// Every operation of the full surface, inherited ones included; an
    /// interface reachable along several paths is listed once
    pub fn all_methods(&self) -> Vec<&'static MethodSignature> {
        let mut seen = Vec::new();
        let mut methods = Vec::new();
        self.collect_methods(&mut seen, &mut methods);
        methods
    }

    fn collect_methods(&self, seen: &mut Vec<&'static str>, methods: &mut Vec<&'static MethodSignature>) {
        if seen.contains(&self.name) {
            return;
        }
        seen.push(self.name);
        methods.extend(self.methods.iter());
        for parent in self.supers {
            parent.collect_methods(seen, methods);
        }
    }
}
