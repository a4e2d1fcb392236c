#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::EmployeeId;
    use crate::state::directory::Employee;

    pub fn employee(id: i64, last: &str, first: &str, role: &str) -> Employee {
        Employee {
            id: EmployeeId::Number(id),
            last_name: last.into(),
            first_name: first.into(),
            role: role.into(),
            email: None,
            employee_number: None,
        }
    }

    pub fn roster_json() -> serde_json::Value {
        serde_json::json!([
            {
                "id": 1,
                "nom": "Martin",
                "prenom": "Paul",
                "poste": "Technicien",
                "adresse_mail": "paul.martin@example.com",
                "matricule": "M-001"
            },
            {
                "id": 2,
                "nom": "Durand",
                "prenom": "Marie",
                "poste": "Comptable",
                "adresse_mail": null,
                "matricule": null
            }
        ])
    }
}
