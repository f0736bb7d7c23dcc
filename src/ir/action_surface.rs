use serde::{Deserialize, Serialize};

use super::RiskLevel;

/// Which textual form a descriptor was recognized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptorSyntax {
    /// `aura://Controller/ACTION$name`
    Aura,
    /// `apex://Controller/ACTION$name`
    Apex,
    /// `serviceComponent://ui.namespace.Controller...`
    ServiceComponent,
}

impl std::fmt::Display for DescriptorSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aura => write!(f, "aura"),
            Self::Apex => write!(f, "apex"),
            Self::ServiceComponent => write!(f, "serviceComponent"),
        }
    }
}

/// A remote action reference found in retrieved text.
///
/// Identity is `(controller, name)`; the syntax it was found in does not
/// participate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDescriptor {
    pub controller: String,
    pub name: String,
    /// Canonical descriptor string, e.g. `aura://RecordUiController/ACTION$getRecordUi`.
    #[serde(rename = "descriptor")]
    pub raw: String,
    pub syntax: DescriptorSyntax,
}

impl ActionDescriptor {
    pub fn new(controller: &str, name: &str, syntax: DescriptorSyntax) -> Self {
        let raw = match syntax {
            DescriptorSyntax::Aura => format!("aura://{controller}/ACTION${name}"),
            DescriptorSyntax::Apex => format!("apex://{controller}/ACTION${name}"),
            DescriptorSyntax::ServiceComponent => {
                format!("serviceComponent://ui.{controller}.{name}")
            }
        };
        Self {
            controller: controller.to_string(),
            name: name.to_string(),
            raw,
            syntax,
        }
    }

    pub fn key(&self) -> ActionKey {
        ActionKey {
            controller: self.controller.clone(),
            name: self.name.clone(),
        }
    }
}

/// Identity key of an action across every source it was seen in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionKey {
    pub controller: String,
    pub name: String,
}

/// How a parameter's shape was determined. Ordered by confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamProvenance {
    /// Guessed from a parameter-object construction near the action name.
    Context,
    /// Read from a server-side method signature.
    Signature,
    /// Taken verbatim from the knowledge base.
    Known,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub required: bool,
    pub description: String,
    #[serde(rename = "inferredFrom")]
    pub provenance: ParamProvenance,
}

/// Functional grouping of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionCategory {
    System,
    Record,
    Apex,
    Ui,
    Community,
    Commerce,
    Data,
    Auth,
    Chat,
    Custom,
}

impl std::fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::Record => write!(f, "record"),
            Self::Apex => write!(f, "apex"),
            Self::Ui => write!(f, "ui"),
            Self::Community => write!(f, "community"),
            Self::Commerce => write!(f, "commerce"),
            Self::Data => write!(f, "data"),
            Self::Auth => write!(f, "auth"),
            Self::Chat => write!(f, "chat"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// A descriptor with schema and risk attached, the unit reported per action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedAction {
    #[serde(flatten)]
    pub action: ActionDescriptor,
    pub return_type: String,
    pub parameters: Vec<ActionParameter>,
    pub category: ActionCategory,
    pub risk_level: RiskLevel,
    pub description: String,
    pub is_known: bool,
    pub requires_auth: bool,
    pub known_weaknesses: Vec<String>,
}

impl EnrichedAction {
    pub fn key(&self) -> ActionKey {
        self.action.key()
    }

    /// Highest-confidence provenance among the parameters, if any.
    pub fn parameter_provenance(&self) -> Option<ParamProvenance> {
        self.parameters.iter().map(|p| p.provenance).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_strings_per_syntax() {
        let aura =
            ActionDescriptor::new("RecordUiController", "getRecordUi", DescriptorSyntax::Aura);
        assert_eq!(aura.raw, "aura://RecordUiController/ACTION$getRecordUi");

        let svc = ActionDescriptor::new("force", "getItems", DescriptorSyntax::ServiceComponent);
        assert_eq!(svc.raw, "serviceComponent://ui.force.getItems");
    }

    #[test]
    fn identity_ignores_syntax() {
        let a = ActionDescriptor::new("Foo", "bar", DescriptorSyntax::Aura);
        let b = ActionDescriptor::new("Foo", "bar", DescriptorSyntax::Apex);
        assert_eq!(a.key(), b.key());
        assert_ne!(a, b);
    }

    #[test]
    fn provenance_confidence_order() {
        assert!(ParamProvenance::Known > ParamProvenance::Signature);
        assert!(ParamProvenance::Signature > ParamProvenance::Context);
    }
}
