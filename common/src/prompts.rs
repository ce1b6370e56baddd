//! プロンプトと出力スキーマ
//!
//! - ANALYSIS_INSTRUCTION: 画像と一緒に送る指示文
//! - SYSTEM_INSTRUCTION: モデルの役割設定
//! - response_schema: 構造化出力スキーマ（モデルへの助言であり強制ではない）

use serde_json::{json, Value};

/// FF&E列挙の指示文
pub const ANALYSIS_INSTRUCTION: &str = "Identify all Furniture, Fixtures, and Equipment (FF&E) in this image. \
List every single item found separately. For each item, provide a specific label and a short visual \
description (material, color, style). Return the bounding box (2d box) for every item.";

/// システム指示
pub const SYSTEM_INSTRUCTION: &str = "You are an expert Interior Designer and FF&E Specialist. \
Your task is to identify movable objects in a room, list them with detailed descriptions, \
and provide accurate 2D bounding boxes for visual identification.";

/// 決定性を優先した低めのサンプリング温度
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

/// 出力スキーマ（Gemini responseSchema 形式）
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "itemCount": {
                "type": "INTEGER",
                "description": "The total number of FF&E items identified in the image."
            },
            "summary": {
                "type": "STRING",
                "description": "A brief summary of the interior design style and the collection of objects found."
            },
            "items": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "label": {
                            "type": "STRING",
                            "description": "The name of the object (e.g., 'Double Bed', 'Table Lamp', 'Persian Rug')."
                        },
                        "description": {
                            "type": "STRING",
                            "description": "A short visual description of the object (e.g., 'Grey upholstered headboard', 'Brass finish with white shade')."
                        },
                        "box_2d": {
                            "type": "ARRAY",
                            "items": { "type": "NUMBER" },
                            "description": "Bounding box coordinates in the order [ymin, xmin, ymax, xmax]. Values should be normalized (0 to 1)."
                        }
                    },
                    "required": ["label", "description", "box_2d"]
                },
                "description": "A list of all Furniture, Fixtures, and Equipment identified."
            },
            "confidenceScore": {
                "type": "NUMBER",
                "description": "A confidence score between 0 and 1 regarding the identification."
            }
        },
        "required": ["itemCount", "summary", "items", "confidenceScore"]
    })
}
