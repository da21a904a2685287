//! Static catalog of NASA GIBS imagery layers served by `/api/nasa-layers`.

use serde::Serialize;

/// Descriptor for one WMTS imagery layer.
#[derive(Debug, Clone, Serialize)]
pub struct ImageryLayer {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "wmtsUrl")]
    pub wmts_url: &'static str,
}

/// The built-in Earth imagery layers.
pub const GIBS_LAYERS: &[ImageryLayer] = &[
    ImageryLayer {
        id: "VIIRS_SNPP_CorrectedReflectance_TrueColor",
        name: "VIIRS SNPP True Color",
        description: "Natural color imagery from VIIRS Suomi NPP satellite",
        wmts_url: "https://gibs.earthdata.nasa.gov/wmts/epsg3857/best/VIIRS_SNPP_CorrectedReflectance_TrueColor/default/{time}/GoogleMapsCompatible_Level9/{z}/{y}/{x}.jpg",
    },
    ImageryLayer {
        id: "MODIS_Terra_CorrectedReflectance_TrueColor",
        name: "MODIS Terra True Color",
        description: "Natural color imagery from MODIS Terra satellite",
        wmts_url: "https://gibs.earthdata.nasa.gov/wmts/epsg3857/best/MODIS_Terra_CorrectedReflectance_TrueColor/default/{time}/GoogleMapsCompatible_Level9/{z}/{y}/{x}.jpg",
    },
    ImageryLayer {
        id: "VIIRS_NOAA20_CorrectedReflectance_TrueColor",
        name: "VIIRS NOAA-20 True Color",
        description: "High-resolution natural color imagery from VIIRS",
        wmts_url: "https://gibs.earthdata.nasa.gov/wmts/epsg3857/best/VIIRS_NOAA20_CorrectedReflectance_TrueColor/default/{time}/GoogleMapsCompatible_Level9/{z}/{y}/{x}.jpg",
    },
    ImageryLayer {
        id: "MODIS_Terra_Land_Surface_Temp_Day",
        name: "Land Surface Temperature (Day)",
        description: "Daytime land surface temperature measurements",
        wmts_url: "https://gibs.earthdata.nasa.gov/wmts/epsg3857/best/MODIS_Terra_Land_Surface_Temp_Day/default/{time}/GoogleMapsCompatible_Level7/{z}/{y}/{x}.png",
    },
    ImageryLayer {
        id: "BlueMarble_NextGeneration",
        name: "Blue Marble",
        description: "Composite global imagery mosaic",
        wmts_url: "https://gibs.earthdata.nasa.gov/wmts/epsg3857/best/BlueMarble_NextGeneration/default/{time}/GoogleMapsCompatible_Level8/{z}/{y}/{x}.jpg",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_serializes_with_camel_case_url_key() {
        let value = serde_json::to_value(&GIBS_LAYERS[0]).unwrap();
        assert!(value.get("wmtsUrl").is_some());
        assert!(value.get("wmts_url").is_none());
    }
}
