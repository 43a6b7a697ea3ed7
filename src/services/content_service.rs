//! Contenido público estático
//!
//! Dicas de manutención y vehículos en destaque que la API sirve sin
//! autenticación.

use lazy_static::lazy_static;
use serde::Serialize;

/// Dica de manutención; `tipo` restringe la dica a una variante
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MaintenanceTip {
    pub id: u32,
    pub dica: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<&'static str>,
}

/// Vehículo en destaque de la vitrine pública
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedVehicle {
    pub modelo: &'static str,
    pub ano: u16,
    pub destaque: &'static str,
    pub imagem_url: &'static str,
}

lazy_static! {
    static ref MAINTENANCE_TIPS: Vec<MaintenanceTip> = vec![
        MaintenanceTip {
            id: 1,
            dica: "Calibre os pneus pelo menos uma vez por semana.",
            tipo: None,
        },
        MaintenanceTip {
            id: 2,
            dica: "Troque o óleo do motor conforme o manual do fabricante.",
            tipo: None,
        },
        MaintenanceTip {
            id: 3,
            dica: "Verifique o nível do fluido de freio mensalmente.",
            tipo: None,
        },
        MaintenanceTip {
            id: 4,
            dica: "Confira o desgaste dos pneus após usar o turbo com frequência.",
            tipo: Some("CarroEsportivo"),
        },
        MaintenanceTip {
            id: 5,
            dica: "Use somente pneus de alto índice de velocidade.",
            tipo: Some("CarroEsportivo"),
        },
        MaintenanceTip {
            id: 6,
            dica: "Inspecione o sistema de freios a ar antes de cada viagem longa.",
            tipo: Some("Caminhao"),
        },
        MaintenanceTip {
            id: 7,
            dica: "Respeite o limite de carga: excesso desgasta a suspensão.",
            tipo: Some("Caminhao"),
        },
        MaintenanceTip {
            id: 8,
            dica: "Faça o rodízio dos pneus a cada 10.000 km.",
            tipo: Some("Carro"),
        },
    ];
    static ref FEATURED_VEHICLES: Vec<FeaturedVehicle> = vec![
        FeaturedVehicle {
            modelo: "Mustang Mach-E",
            ano: 2024,
            destaque: "Elétrico com 480 km de autonomia",
            imagem_url: "https://example.com/imagens/mustang-mach-e.jpg",
        },
        FeaturedVehicle {
            modelo: "Porsche 911 Turbo S",
            ano: 2025,
            destaque: "0 a 100 km/h em 2,7 segundos",
            imagem_url: "https://example.com/imagens/porsche-911.jpg",
        },
        FeaturedVehicle {
            modelo: "Scania R 450 Super",
            ano: 2024,
            destaque: "8% mais econômico na linha pesada",
            imagem_url: "https://example.com/imagens/scania-r450.jpg",
        },
    ];
}

/// `true` si el label pertenece al vocabulario de variantes
pub fn is_valid_kind_label(label: &str) -> bool {
    matches!(label, "Carro" | "CarroEsportivo" | "Caminhao")
}

/// Dicas generales más las específicas de la variante pedida
pub fn maintenance_tips(kind_filter: Option<&str>) -> Vec<MaintenanceTip> {
    MAINTENANCE_TIPS
        .iter()
        .filter(|tip| match (tip.tipo, kind_filter) {
            (None, _) => true,
            (Some(_), None) => true,
            (Some(tip_kind), Some(filter)) => tip_kind == filter,
        })
        .copied()
        .collect()
}

pub fn featured_vehicles() -> Vec<FeaturedVehicle> {
    FEATURED_VEHICLES.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sin_filtro_devuelve_todas_las_dicas() {
        assert_eq!(maintenance_tips(None).len(), MAINTENANCE_TIPS.len());
    }

    #[test]
    fn filtro_por_variante_excluye_las_otras() {
        let tips = maintenance_tips(Some("Caminhao"));
        assert!(tips
            .iter()
            .all(|tip| tip.tipo.is_none() || tip.tipo == Some("Caminhao")));
        assert!(tips.iter().any(|tip| tip.tipo == Some("Caminhao")));
        assert!(!tips.iter().any(|tip| tip.tipo == Some("CarroEsportivo")));
    }

    #[test]
    fn vocabulario_de_variantes() {
        assert!(is_valid_kind_label("Carro"));
        assert!(is_valid_kind_label("CarroEsportivo"));
        assert!(is_valid_kind_label("Caminhao"));
        assert!(!is_valid_kind_label("Moto"));
    }
}
