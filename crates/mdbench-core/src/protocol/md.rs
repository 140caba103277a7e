use super::dag::ProtocolDag;
use super::results::{ProtocolDagResult, ProtocolResult};
use super::settings::{self, MdProtocolSettings};
use super::unit::MdUnit;
use crate::core::models::system::ChemicalSystem;

/// A plain MD protocol: minimize, equilibrate, and run production dynamics
/// on one chemical system, all inside a single work unit.
#[derive(Debug, Clone)]
pub struct PlainMdProtocol {
    settings: MdProtocolSettings,
}

impl PlainMdProtocol {
    pub fn new(settings: MdProtocolSettings) -> Self {
        Self { settings }
    }

    /// The engine's stock settings tree.
    pub fn default_settings() -> MdProtocolSettings {
        MdProtocolSettings::default()
    }

    /// The fixed short-simulation profile used for throughput benchmarking.
    pub fn benchmark_settings() -> MdProtocolSettings {
        settings::benchmark_settings()
    }

    pub fn settings(&self) -> &MdProtocolSettings {
        &self.settings
    }

    /// Builds the DAG for one system. The DAG is named after the system's
    /// protein so working directories are recognizable.
    pub fn create(&self, system: &ChemicalSystem) -> ProtocolDag {
        let name = system
            .protein()
            .map(|p| format!("plain-md-{}", p.name))
            .unwrap_or_else(|| "plain-md".to_string());
        ProtocolDag {
            name,
            units: vec![MdUnit::new(
                "md-unit",
                system.clone(),
                self.settings.clone(),
            )],
        }
    }

    /// Gathers executed DAG results into a protocol-level view.
    pub fn gather<'a>(
        &self,
        results: impl IntoIterator<Item = &'a ProtocolDagResult>,
    ) -> ProtocolResult {
        ProtocolResult::from_dag_results(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::components::{Component, SolventComponent};
    use crate::core::models::protein::ProteinComponent;

    fn named_system(name: &str) -> ChemicalSystem {
        let mut system = ChemicalSystem::new();
        system.insert(
            "protein",
            Component::Protein(ProteinComponent {
                name: name.to_string(),
                chains: Vec::new(),
            }),
        );
        system.insert("solvent", Component::Solvent(SolventComponent::default()));
        system
    }

    #[test]
    fn create_emits_a_single_unit_named_dag() {
        let protocol = PlainMdProtocol::new(PlainMdProtocol::benchmark_settings());
        let dag = protocol.create(&named_system("tyk2"));
        assert_eq!(dag.name, "plain-md-tyk2");
        assert_eq!(dag.units.len(), 1);
        assert_eq!(dag.units[0].name(), "md-unit");
    }

    #[test]
    fn create_handles_systems_without_a_protein() {
        let protocol = PlainMdProtocol::new(PlainMdProtocol::default_settings());
        let dag = protocol.create(&ChemicalSystem::new());
        assert_eq!(dag.name, "plain-md");
    }

    #[test]
    fn gather_over_no_results_is_empty() {
        let protocol = PlainMdProtocol::new(PlainMdProtocol::default_settings());
        let gathered = protocol.gather(std::iter::empty::<&ProtocolDagResult>());
        assert!(gathered.pdb_filenames().is_empty());
    }
}
