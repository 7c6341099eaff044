//! Google Sheets publisher
//!
//! One run performs at most four remote calls: token exchange, worksheet
//! lookup (plus creation when absent), one bulk values write, one bulk
//! formatting batchUpdate. There is no partial-failure recovery; a failed
//! call fails the run.

use super::SheetPublisher;
use crate::error::{BidError, BidResult};
use crate::types::{Cell, Grid, StyleBatch, StyleOp};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const TOKEN_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const SCOPES: &str =
    "https://www.googleapis.com/auth/spreadsheets https://www.googleapis.com/auth/drive";

// Capacity of a worksheet created on first use
const DEFAULT_ROW_COUNT: u32 = 1000;
const DEFAULT_COLUMN_COUNT: u32 = 26;

#[derive(Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    token_uri: String,
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct GoogleSheetsPublisher {
    client: reqwest::blocking::Client,
    token: String,
    sheet_id: String,
    worksheet: String,
}

impl GoogleSheetsPublisher {
    /// Authenticate with the service-account key file.
    ///
    /// A missing or invalid key file is a fatal [`BidError::Credential`];
    /// there is no degraded mode for the remote target.
    pub fn connect(credentials: &Path, sheet_id: &str, worksheet: &str) -> BidResult<Self> {
        let raw = std::fs::read_to_string(credentials).map_err(|e| {
            BidError::Credential(format!(
                "Cannot read credential file '{}': {}",
                credentials.display(),
                e
            ))
        })?;
        let key: ServiceAccountKey = serde_json::from_str(&raw).map_err(|e| {
            BidError::Credential(format!(
                "Invalid credential file '{}': {}",
                credentials.display(),
                e
            ))
        })?;

        let client = reqwest::blocking::Client::builder().build()?;
        let token = fetch_token(&client, &key)?;

        Ok(GoogleSheetsPublisher {
            client,
            token,
            sheet_id: sheet_id.to_string(),
            worksheet: worksheet.to_string(),
        })
    }

    /// Numeric gid of the target worksheet, creating it when absent
    fn ensure_worksheet(&self) -> BidResult<i64> {
        let url = format!("{}/{}?fields=sheets.properties", SHEETS_API, self.sheet_id);
        let meta: Value = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()?
            .error_for_status()?
            .json()?;

        if let Some(sheets) = meta["sheets"].as_array() {
            for sheet in sheets {
                let props = &sheet["properties"];
                if props["title"].as_str() == Some(self.worksheet.as_str()) {
                    if let Some(gid) = props["sheetId"].as_i64() {
                        return Ok(gid);
                    }
                }
            }
        }

        let body = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": self.worksheet,
                        "gridProperties": {
                            "rowCount": DEFAULT_ROW_COUNT,
                            "columnCount": DEFAULT_COLUMN_COUNT,
                        }
                    }
                }
            }]
        });
        let reply = self.batch_update(&body)?;
        reply["replies"][0]["addSheet"]["properties"]["sheetId"]
            .as_i64()
            .ok_or_else(|| {
                BidError::Publish(format!(
                    "addSheet reply carries no sheetId for worksheet '{}'",
                    self.worksheet
                ))
            })
    }

    /// Clear the whole worksheet before the rewrite
    fn clear(&self) -> BidResult<()> {
        let url = format!(
            "{}/{}/values/{}:clear",
            SHEETS_API, self.sheet_id, self.worksheet
        );
        self.client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({}))
            .send()?
            .error_for_status()?;
        Ok(())
    }

    /// One bulk values write anchored at A1
    fn write_values(&self, grid: &Grid) -> BidResult<()> {
        let range = if grid.is_empty() {
            format!("{}!A1", self.worksheet)
        } else {
            format!(
                "{}!A1:{}{}",
                self.worksheet,
                super::column_letter(grid.width() - 1),
                grid.row_count()
            )
        };
        let url = format!(
            "{}/{}/values/{}?valueInputOption=USER_ENTERED",
            SHEETS_API, self.sheet_id, range
        );
        self.client
            .put(&url)
            .bearer_auth(&self.token)
            .json(&values_payload(grid))
            .send()?
            .error_for_status()?;
        Ok(())
    }

    fn batch_update(&self, body: &Value) -> BidResult<Value> {
        let url = format!("{}/{}:batchUpdate", SHEETS_API, self.sheet_id);
        Ok(self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()?
            .error_for_status()?
            .json()?)
    }
}

impl SheetPublisher for GoogleSheetsPublisher {
    fn publish(&mut self, grid: &Grid, styles: &StyleBatch) -> BidResult<()> {
        let gid = self.ensure_worksheet()?;
        self.clear()?;
        self.write_values(grid)?;

        let requests = style_requests(gid, styles);
        if !requests.is_empty() {
            self.batch_update(&json!({ "requests": requests }))?;
        }
        Ok(())
    }
}

fn fetch_token(client: &reqwest::blocking::Client, key: &ServiceAccountKey) -> BidResult<String> {
    let iat = chrono::Utc::now().timestamp();
    let claims = Claims {
        iss: &key.client_email,
        scope: SCOPES,
        aud: &key.token_uri,
        iat,
        exp: iat + 3600,
    };

    let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| BidError::Credential(format!("Invalid service-account key: {}", e)))?;
    let assertion = encode(&Header::new(Algorithm::RS256), &claims, &signing_key)
        .map_err(|e| BidError::Credential(format!("Failed to sign token request: {}", e)))?;

    let response: TokenResponse = client
        .post(&key.token_uri)
        .form(&[("grant_type", TOKEN_GRANT), ("assertion", assertion.as_str())])
        .send()?
        .error_for_status()?
        .json()?;
    Ok(response.access_token)
}

/// Grid → values.update payload
fn values_payload(grid: &Grid) -> Value {
    let rows: Vec<Value> = grid
        .rows
        .iter()
        .map(|row| Value::Array(row.iter().map(cell_value).collect()))
        .collect();
    json!({ "majorDimension": "ROWS", "values": rows })
}

fn cell_value(cell: &Cell) -> Value {
    match cell {
        Cell::Empty => json!(""),
        Cell::Text(s) => json!(s),
        Cell::Number(n) => json!(n),
    }
}

/// Style batch → repeatCell requests, insertion order preserved.
///
/// Field masks list only the attributes an op actually sets, so overlapping
/// ops merge per attribute (matching [`crate::types::CellStyle::merge`]).
fn style_requests(sheet_gid: i64, styles: &StyleBatch) -> Vec<Value> {
    styles
        .iter()
        .filter_map(|op| style_request(sheet_gid, op))
        .collect()
}

fn style_request(sheet_gid: i64, op: &StyleOp) -> Option<Value> {
    let mut format = serde_json::Map::new();
    let mut fields = Vec::new();

    if let Some(bg) = op.style.background {
        format.insert(
            "backgroundColor".to_string(),
            json!({
                "red": bg.r as f64 / 255.0,
                "green": bg.g as f64 / 255.0,
                "blue": bg.b as f64 / 255.0,
            }),
        );
        fields.push("userEnteredFormat.backgroundColor");
    }
    if op.style.bold {
        format.insert("textFormat".to_string(), json!({ "bold": true }));
        fields.push("userEnteredFormat.textFormat.bold");
    }
    if fields.is_empty() {
        return None;
    }

    Some(json!({
        "repeatCell": {
            "range": {
                "sheetId": sheet_gid,
                "startRowIndex": op.rect.start_row,
                "endRowIndex": op.rect.end_row,
                "startColumnIndex": op.rect.start_col,
                "endColumnIndex": op.rect.end_col,
            },
            "cell": { "userEnteredFormat": Value::Object(format) },
            "fields": fields.join(","),
        }
    }))
}
