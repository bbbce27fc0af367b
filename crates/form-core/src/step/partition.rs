use form_domain::FieldDefinition;

use crate::errors::CoreEngineError;

/// Cantidad de pasos de un catálogo: divisiones + 1.
pub fn compute_steps(fields: &[FieldDefinition]) -> usize {
    fields.iter().filter(|f| f.is_division).count() + 1
}

/// Catálogo ordenado por `order` junto con las posiciones de sus divisiones.
/// Se calcula una vez por carga y no cambia durante la sesión.
#[derive(Debug, Clone)]
pub struct StepPartition {
    fields: Vec<FieldDefinition>,
    division_indices: Vec<usize>,
}

impl StepPartition {
    pub fn new(mut fields: Vec<FieldDefinition>) -> Self {
        // sort estable: empates en `order` conservan el orden de llegada
        fields.sort_by_key(|f| f.order);
        let division_indices = fields.iter()
                                     .enumerate()
                                     .filter(|(_, f)| f.is_division)
                                     .map(|(i, _)| i)
                                     .collect();
        Self { fields, division_indices }
    }

    pub fn total_steps(&self) -> usize {
        self.division_indices.len() + 1
    }

    /// Campos renderizables del paso `step` (1-indexado), sin divisiones.
    pub fn fields_for_step(&self, step: usize) -> Result<&[FieldDefinition], CoreEngineError> {
        let total = self.total_steps();
        if step == 0 || step > total {
            return Err(CoreEngineError::InvalidStepIndex { step, total });
        }
        let start = if step == 1 { 0 } else { self.division_indices[step - 2] + 1 };
        let end = if step == total { self.fields.len() } else { self.division_indices[step - 1] };
        Ok(&self.fields[start..end])
    }

    /// Paso al que pertenece un campo renderizable.
    pub fn step_of(&self, field_id: &str) -> Option<usize> {
        let pos = self.fields.iter().position(|f| f.id == field_id && !f.is_division)?;
        Some(self.division_indices.iter().filter(|&&d| d < pos).count() + 1)
    }

    pub fn get(&self, field_id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// Todos los campos renderizables en orden.
    pub fn renderable(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| !f.is_division)
    }

    /// Catálogo completo ordenado, divisiones incluidas.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }
}
