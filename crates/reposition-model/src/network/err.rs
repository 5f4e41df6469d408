// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::network::{container::ContainerIdentifier, port::PortName};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicatePortError {
    name: PortName,
}

impl DuplicatePortError {
    pub fn new(name: PortName) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &PortName {
        &self.name
    }
}

impl std::fmt::Display for DuplicatePortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is declared more than once", self.name)
    }
}

impl std::error::Error for DuplicatePortError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateContainerError {
    id: ContainerIdentifier,
}

impl DuplicateContainerError {
    pub fn new(id: ContainerIdentifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &ContainerIdentifier {
        &self.id
    }
}

impl std::fmt::Display for DuplicateContainerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is declared more than once", self.id)
    }
}

impl std::error::Error for DuplicateContainerError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PriorityOutOfRangeError {
    id: ContainerIdentifier,
    priority: u8,
}

impl PriorityOutOfRangeError {
    pub fn new(id: ContainerIdentifier, priority: u8) -> Self {
        Self { id, priority }
    }

    pub fn id(&self) -> &ContainerIdentifier {
        &self.id
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }
}

impl std::fmt::Display for PriorityOutOfRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} has priority {} outside of 1..=10",
            self.id, self.priority
        )
    }
}

impl std::error::Error for PriorityOutOfRangeError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownPortError {
    container: ContainerIdentifier,
    port: PortName,
}

impl UnknownPortError {
    pub fn new(container: ContainerIdentifier, port: PortName) -> Self {
        Self { container, port }
    }

    pub fn container(&self) -> &ContainerIdentifier {
        &self.container
    }

    pub fn port(&self) -> &PortName {
        &self.port
    }
}

impl std::fmt::Display for UnknownPortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} is located at {} which is not part of the network",
            self.container, self.port
        )
    }
}

impl std::error::Error for UnknownPortError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NetworkError {
    DuplicatePort(DuplicatePortError),
    DuplicateContainer(DuplicateContainerError),
    PriorityOutOfRange(PriorityOutOfRangeError),
    UnknownPort(UnknownPortError),
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::DuplicatePort(e) => write!(f, "{}", e),
            NetworkError::DuplicateContainer(e) => write!(f, "{}", e),
            NetworkError::PriorityOutOfRange(e) => write!(f, "{}", e),
            NetworkError::UnknownPort(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<DuplicatePortError> for NetworkError {
    fn from(err: DuplicatePortError) -> Self {
        NetworkError::DuplicatePort(err)
    }
}

impl From<DuplicateContainerError> for NetworkError {
    fn from(err: DuplicateContainerError) -> Self {
        NetworkError::DuplicateContainer(err)
    }
}

impl From<PriorityOutOfRangeError> for NetworkError {
    fn from(err: PriorityOutOfRangeError) -> Self {
        NetworkError::PriorityOutOfRange(err)
    }
}

impl From<UnknownPortError> for NetworkError {
    fn from(err: UnknownPortError) -> Self {
        NetworkError::UnknownPort(err)
    }
}

/// Which section of the payload an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Port,
    Container,
    Route,
    Relocation,
    Demand,
}

impl EntryKind {
    pub fn section(&self) -> &'static str {
        match self {
            EntryKind::Port => "ports",
            EntryKind::Container => "containers",
            EntryKind::Route => "routes",
            EntryKind::Relocation => "relocations",
            EntryKind::Demand => "demands",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntryKind::Port => "port",
            EntryKind::Container => "container",
            EntryKind::Route => "route",
            EntryKind::Relocation => "relocation",
            EntryKind::Demand => "demand",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug)]
pub struct MalformedEntryError {
    kind: EntryKind,
    index: usize,
    source: serde_json::Error,
}

impl MalformedEntryError {
    pub fn new(kind: EntryKind, index: usize, source: serde_json::Error) -> Self {
        Self {
            kind,
            index,
            source,
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl std::fmt::Display for MalformedEntryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Malformed {} entry at {}[{}]: {}",
            self.kind,
            self.kind.section(),
            self.index,
            self.source
        )
    }
}

impl std::error::Error for MalformedEntryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[derive(Debug)]
pub enum NetworkLoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
    NotAnObject,
    InvalidSection(&'static str),
    MalformedEntry(MalformedEntryError),
    Network(NetworkError),
}

impl std::fmt::Display for NetworkLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkLoadError::Io(e) => write!(f, "I/O error: {}", e),
            NetworkLoadError::Json(e) => write!(f, "Invalid JSON: {}", e),
            NetworkLoadError::NotAnObject => write!(f, "The payload is not a JSON object"),
            NetworkLoadError::InvalidSection(key) => {
                write!(f, "The `{}` section has the wrong JSON type", key)
            }
            NetworkLoadError::MalformedEntry(e) => write!(f, "{}", e),
            NetworkLoadError::Network(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for NetworkLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NetworkLoadError::Io(e) => Some(e),
            NetworkLoadError::Json(e) => Some(e),
            NetworkLoadError::MalformedEntry(e) => Some(e),
            NetworkLoadError::Network(e) => Some(e),
            NetworkLoadError::NotAnObject | NetworkLoadError::InvalidSection(_) => None,
        }
    }
}

impl From<MalformedEntryError> for NetworkLoadError {
    fn from(err: MalformedEntryError) -> Self {
        NetworkLoadError::MalformedEntry(err)
    }
}

impl From<NetworkError> for NetworkLoadError {
    fn from(err: NetworkError) -> Self {
        NetworkLoadError::Network(err)
    }
}
