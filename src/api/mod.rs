use axum::{
    Router,
    extract::{Json, Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::core::{
    DateRange, Frequency, LumpsumResult, NavPoint, NavSeries, NeedsReview, RiskReturn,
    SimulationResult, SipSummary, StrategyComparison, StrategyParams, SwpResult,
    RISK_RETURN_LOOKBACK, compare_strategies, moving_average, risk_return, simulate_lumpsum,
    simulate_sip, simulate_swp,
};
use crate::data::{
    CachedScheme, CatalogPage, DEFAULT_PAGE_SIZE, JsonDirSource, PeriodReturn, ReturnPeriod,
    SchemeCache, SchemeMetadata, SchemeSource, StoreError, search_schemes, trailing_return,
    validate_scheme_code,
};

const DEFAULT_SIP_AMOUNT: f64 = 5_000.0;
const DEFAULT_LUMPSUM_AMOUNT: f64 = 50_000.0;
const DEFAULT_SWP_AMOUNT: f64 = 2_000.0;
const DEFAULT_START_DATE: &str = "2023-01-01";
const DEFAULT_END_DATE: &str = "2023-12-31";
const DEFAULT_MA_WINDOW: usize = 10;
const MIN_MA_WINDOW: usize = 2;
const MAX_COMPARE_SCHEMES: usize = 10;

type SharedCache<S> = Arc<SchemeCache<S>>;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub data_dir: PathBuf,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiFrequency {
    #[serde(alias = "week", alias = "Weekly")]
    Weekly,
    #[serde(alias = "month", alias = "Monthly")]
    Monthly,
    #[serde(alias = "year", alias = "annual", alias = "Yearly")]
    Yearly,
}

impl From<ApiFrequency> for Frequency {
    fn from(value: ApiFrequency) -> Self {
        match value {
            ApiFrequency::Weekly => Frequency::Weekly,
            ApiFrequency::Monthly => Frequency::Monthly,
            ApiFrequency::Yearly => Frequency::Yearly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Calculator {
    Sip,
    Lumpsum,
    Swp,
    Strategies,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CalculatorPayload {
    sip_amount: Option<f64>,
    #[serde(alias = "sipFrequency")]
    frequency: Option<ApiFrequency>,
    start_date: Option<String>,
    end_date: Option<String>,
    lumpsum_amount: Option<f64>,
    swp_amount: Option<f64>,
    swp_frequency: Option<ApiFrequency>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct CalculatorRequest {
    range: DateRange,
    strategy: StrategyParams,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CatalogQuery {
    q: Option<String>,
    page: Option<usize>,
    page_size: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NavQuery {
    window: Option<usize>,
    ma: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReturnsQuery {
    period: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CompareQuery {
    codes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NeedsReviewResponse {
    needs_review: bool,
    reason: String,
}

#[derive(Debug, Serialize)]
struct ChartResponse {
    labels: Vec<NaiveDate>,
    values: Vec<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SipResponse {
    start_date: NaiveDate,
    end_date: NaiveDate,
    frequency: Frequency,
    amount: f64,
    total_invested: f64,
    total_units: f64,
    current_value: f64,
    absolute_return: f64,
    annualized_return: Option<f64>,
    installments: usize,
    chart: ChartResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LumpsumResponse {
    start_date: NaiveDate,
    end_date: NaiveDate,
    amount: f64,
    entry_date: NaiveDate,
    entry_nav: f64,
    units: f64,
    current_value: Option<f64>,
    absolute_return: Option<f64>,
    chart: ChartResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwpResponse {
    start_date: NaiveDate,
    end_date: NaiveDate,
    frequency: Frequency,
    withdrawal: f64,
    initial_value: f64,
    initial_units: f64,
    final_units: f64,
    final_value: Option<f64>,
    total_withdrawn: f64,
    withdrawals: usize,
    chart: ChartResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StrategiesResponse {
    start_date: NaiveDate,
    end_date: NaiveDate,
    labels: Vec<NaiveDate>,
    sip: Vec<Option<f64>>,
    lumpsum: Vec<Option<f64>>,
    swp: Vec<Option<f64>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum CalculatorResponse {
    Sip(SipResponse),
    Lumpsum(LumpsumResponse),
    Swp(SwpResponse),
    Strategies(StrategiesResponse),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SchemeResponse<'a> {
    metadata: &'a SchemeMetadata,
    nav_history: &'a [NavPoint],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NavWindowResponse {
    scheme_code: String,
    labels: Vec<NaiveDate>,
    navs: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    moving_average: Option<Vec<Option<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    window: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ReturnsRow {
    Computed(PeriodReturn),
    NeedsReview {
        period: ReturnPeriod,
        #[serde(rename = "needsReview")]
        needs_review: bool,
        reason: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareScheme {
    scheme_code: String,
    scheme_name: String,
    fund_house: String,
    scheme_type: String,
    scheme_category: String,
    risk_return: RiskReturn,
    navs: Vec<Option<f64>>,
}

#[derive(Debug, Serialize)]
struct CompareResponse {
    labels: Vec<NaiveDate>,
    schemes: Vec<CompareScheme>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CacheInvalidationResponse {
    scheme_code: String,
    invalidated: bool,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn run_http_server(config: ServerConfig) -> std::io::Result<()> {
    let cache = Arc::new(SchemeCache::new(JsonDirSource::new(&config.data_dir)));
    let app = router(cache);

    let listener = TcpListener::bind(config.addr).await?;
    tracing::info!(
        addr = %config.addr,
        data_dir = %config.data_dir.display(),
        "mutual fund API listening"
    );

    axum::serve(listener, app).await
}

pub fn router<S: SchemeSource + 'static>(cache: SharedCache<S>) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/mf", get(catalog_handler::<S>))
        .route("/api/compare", get(compare_handler::<S>))
        .route("/api/scheme/:code", get(scheme_handler::<S>))
        .route("/api/scheme/:code/cache", delete(invalidate_handler::<S>))
        .route("/api/scheme/:code/returns", get(returns_handler::<S>))
        .route("/api/scheme/:code/nav", get(nav_handler::<S>))
        .route(
            "/api/scheme/:code/sip",
            get(sip_get_handler::<S>).post(sip_post_handler::<S>),
        )
        .route(
            "/api/scheme/:code/lumpsum",
            get(lumpsum_get_handler::<S>).post(lumpsum_post_handler::<S>),
        )
        .route(
            "/api/scheme/:code/swp",
            get(swp_get_handler::<S>).post(swp_post_handler::<S>),
        )
        .route(
            "/api/scheme/:code/strategies",
            get(strategies_get_handler::<S>).post(strategies_post_handler::<S>),
        )
        .fallback(not_found_handler)
        .with_state(cache)
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn catalog_handler<S: SchemeSource + 'static>(
    State(cache): State<SharedCache<S>>,
    Query(query): Query<CatalogQuery>,
) -> Response {
    run_blocking(move || match cache.catalog() {
        Ok(schemes) => json_response(StatusCode::OK, catalog_page(&schemes, query)),
        Err(err) => store_error_response(&err),
    })
    .await
}

async fn scheme_handler<S: SchemeSource + 'static>(
    State(cache): State<SharedCache<S>>,
    Path(code): Path<String>,
) -> Response {
    run_blocking(move || match cache.scheme(&code) {
        Ok(scheme) => json_response(
            StatusCode::OK,
            SchemeResponse {
                metadata: &scheme.metadata,
                nav_history: scheme.series.points(),
            },
        ),
        Err(err) => store_error_response(&err),
    })
    .await
}

async fn invalidate_handler<S: SchemeSource + 'static>(
    State(cache): State<SharedCache<S>>,
    Path(code): Path<String>,
) -> Response {
    if let Err(err) = validate_scheme_code(&code) {
        return store_error_response(&err);
    }
    let invalidated = cache.invalidate(&code);
    json_response(
        StatusCode::OK,
        CacheInvalidationResponse {
            scheme_code: code,
            invalidated,
        },
    )
}

async fn returns_handler<S: SchemeSource + 'static>(
    State(cache): State<SharedCache<S>>,
    Path(code): Path<String>,
    Query(query): Query<ReturnsQuery>,
) -> Response {
    let period = match query.period.as_deref().map(str::parse::<ReturnPeriod>) {
        None => None,
        Some(Ok(period)) => Some(period),
        Some(Err(msg)) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    run_blocking(move || {
        let scheme = match cache.scheme(&code) {
            Ok(scheme) => scheme,
            Err(err) => return store_error_response(&err),
        };
        match period {
            Some(period) => json_response(StatusCode::OK, returns_row(&scheme.series, period)),
            None => {
                let rows: Vec<ReturnsRow> = ReturnPeriod::ALL
                    .into_iter()
                    .map(|period| returns_row(&scheme.series, period))
                    .collect();
                json_response(StatusCode::OK, rows)
            }
        }
    })
    .await
}

async fn nav_handler<S: SchemeSource + 'static>(
    State(cache): State<SharedCache<S>>,
    Path(code): Path<String>,
    Query(query): Query<NavQuery>,
) -> Response {
    run_blocking(move || match cache.scheme(&code) {
        Ok(scheme) => json_response(StatusCode::OK, nav_window(&code, &scheme.series, &query)),
        Err(err) => store_error_response(&err),
    })
    .await
}

async fn compare_handler<S: SchemeSource + 'static>(
    State(cache): State<SharedCache<S>>,
    Query(query): Query<CompareQuery>,
) -> Response {
    let codes = match compare_codes(query) {
        Ok(codes) => codes,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    run_blocking(move || {
        let mut schemes = Vec::with_capacity(codes.len());
        for code in &codes {
            match cache.scheme(code) {
                Ok(scheme) => schemes.push(scheme),
                Err(err) => return store_error_response(&err),
            }
        }
        tracing::debug!(schemes = schemes.len(), "comparing schemes");
        json_response(StatusCode::OK, build_compare_response(&schemes))
    })
    .await
}

async fn sip_get_handler<S: SchemeSource + 'static>(
    State(cache): State<SharedCache<S>>,
    Path(code): Path<String>,
    Query(payload): Query<CalculatorPayload>,
) -> Response {
    calculator_handler_impl(cache, code, payload, Calculator::Sip).await
}

async fn sip_post_handler<S: SchemeSource + 'static>(
    State(cache): State<SharedCache<S>>,
    Path(code): Path<String>,
    Json(payload): Json<CalculatorPayload>,
) -> Response {
    calculator_handler_impl(cache, code, payload, Calculator::Sip).await
}

async fn lumpsum_get_handler<S: SchemeSource + 'static>(
    State(cache): State<SharedCache<S>>,
    Path(code): Path<String>,
    Query(payload): Query<CalculatorPayload>,
) -> Response {
    calculator_handler_impl(cache, code, payload, Calculator::Lumpsum).await
}

async fn lumpsum_post_handler<S: SchemeSource + 'static>(
    State(cache): State<SharedCache<S>>,
    Path(code): Path<String>,
    Json(payload): Json<CalculatorPayload>,
) -> Response {
    calculator_handler_impl(cache, code, payload, Calculator::Lumpsum).await
}

async fn swp_get_handler<S: SchemeSource + 'static>(
    State(cache): State<SharedCache<S>>,
    Path(code): Path<String>,
    Query(payload): Query<CalculatorPayload>,
) -> Response {
    calculator_handler_impl(cache, code, payload, Calculator::Swp).await
}

async fn swp_post_handler<S: SchemeSource + 'static>(
    State(cache): State<SharedCache<S>>,
    Path(code): Path<String>,
    Json(payload): Json<CalculatorPayload>,
) -> Response {
    calculator_handler_impl(cache, code, payload, Calculator::Swp).await
}

async fn strategies_get_handler<S: SchemeSource + 'static>(
    State(cache): State<SharedCache<S>>,
    Path(code): Path<String>,
    Query(payload): Query<CalculatorPayload>,
) -> Response {
    calculator_handler_impl(cache, code, payload, Calculator::Strategies).await
}

async fn strategies_post_handler<S: SchemeSource + 'static>(
    State(cache): State<SharedCache<S>>,
    Path(code): Path<String>,
    Json(payload): Json<CalculatorPayload>,
) -> Response {
    calculator_handler_impl(cache, code, payload, Calculator::Strategies).await
}

async fn calculator_handler_impl<S: SchemeSource + 'static>(
    cache: SharedCache<S>,
    code: String,
    payload: CalculatorPayload,
    calculator: Calculator,
) -> Response {
    run_blocking(move || {
        let scheme = match cache.scheme(&code) {
            Ok(scheme) => scheme,
            Err(err) => return store_error_response(&err),
        };
        let outcome = calculator_request_from_payload(payload)
            .and_then(|request| calculate(&scheme.series, &request, calculator));

        match outcome {
            Ok(response) => json_response(StatusCode::OK, response),
            Err(review) => {
                tracing::debug!(
                    scheme_code = %code,
                    calculator = ?calculator,
                    reason = %review,
                    "calculation needs review"
                );
                needs_review_response(review)
            }
        }
    })
    .await
}

/// Scheme loads touch the file system and simulations are CPU-bound; both run
/// on the blocking pool so the reactor threads stay free.
async fn run_blocking<F>(work: F) -> Response
where
    F: FnOnce() -> Response + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(error = %err, "request task failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn needs_review_response(review: NeedsReview) -> Response {
    json_response(StatusCode::OK, needs_review_body(review))
}

fn needs_review_body(review: NeedsReview) -> NeedsReviewResponse {
    NeedsReviewResponse {
        needs_review: true,
        reason: review.to_string(),
    }
}

fn store_error_response(err: &StoreError) -> Response {
    match err {
        StoreError::NotFound(_) => error_response(StatusCode::NOT_FOUND, &err.to_string()),
        StoreError::InvalidCode(_) => error_response(StatusCode::BAD_REQUEST, &err.to_string()),
        StoreError::Io { .. } | StoreError::Json { .. } => {
            tracing::error!(error = %err, "scheme store failure");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load scheme data",
            )
        }
    }
}

#[cfg(test)]
fn calculator_request_from_json(json: &str) -> Result<CalculatorRequest, String> {
    let payload = serde_json::from_str::<CalculatorPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    calculator_request_from_payload(payload).map_err(|review| review.to_string())
}

fn calculator_request_from_payload(
    payload: CalculatorPayload,
) -> Result<CalculatorRequest, NeedsReview> {
    let range = DateRange::parse(
        payload.start_date.as_deref().unwrap_or(DEFAULT_START_DATE),
        payload.end_date.as_deref().unwrap_or(DEFAULT_END_DATE),
    )?;

    Ok(CalculatorRequest {
        range,
        strategy: StrategyParams {
            sip_amount: payload.sip_amount.unwrap_or(DEFAULT_SIP_AMOUNT),
            sip_frequency: payload.frequency.map_or(Frequency::Monthly, Frequency::from),
            lumpsum_amount: payload.lumpsum_amount.unwrap_or(DEFAULT_LUMPSUM_AMOUNT),
            swp_amount: payload.swp_amount.unwrap_or(DEFAULT_SWP_AMOUNT),
            swp_frequency: payload.swp_frequency.map_or(Frequency::Monthly, Frequency::from),
        },
    })
}

fn calculate(
    series: &NavSeries,
    request: &CalculatorRequest,
    calculator: Calculator,
) -> Result<CalculatorResponse, NeedsReview> {
    let range = &request.range;
    let params = &request.strategy;
    match calculator {
        Calculator::Sip => simulate_sip(series, params.sip_amount, params.sip_frequency, range)
            .map(|summary| CalculatorResponse::Sip(sip_response(request, summary))),
        Calculator::Lumpsum => simulate_lumpsum(series, params.lumpsum_amount, range)
            .map(|result| CalculatorResponse::Lumpsum(lumpsum_response(request, result))),
        Calculator::Swp => simulate_swp(series, params.swp_amount, params.swp_frequency, range)
            .map(|result| CalculatorResponse::Swp(swp_response(request, result))),
        Calculator::Strategies => compare_strategies(series, params, range).map(|comparison| {
            CalculatorResponse::Strategies(strategies_response(request, comparison))
        }),
    }
}

fn sip_response(request: &CalculatorRequest, summary: SipSummary) -> SipResponse {
    SipResponse {
        start_date: request.range.start(),
        end_date: request.range.end(),
        frequency: request.strategy.sip_frequency,
        amount: request.strategy.sip_amount,
        total_invested: round2(summary.total_invested),
        total_units: summary.total_units,
        current_value: round2(summary.current_value),
        absolute_return: round2(summary.absolute_return_pct),
        annualized_return: summary.annualized_return_pct.map(round2),
        installments: summary.installments,
        chart: chart(summary.series),
    }
}

fn lumpsum_response(request: &CalculatorRequest, result: LumpsumResult) -> LumpsumResponse {
    let current_value = result.series.last_value();
    LumpsumResponse {
        start_date: request.range.start(),
        end_date: request.range.end(),
        amount: result.invested,
        entry_date: result.entry_date,
        entry_nav: result.entry_nav,
        units: result.units,
        current_value: current_value.map(round2),
        absolute_return: current_value
            .map(|value| round2((value - result.invested) / result.invested * 100.0)),
        chart: chart(result.series),
    }
}

fn swp_response(request: &CalculatorRequest, result: SwpResult) -> SwpResponse {
    SwpResponse {
        start_date: request.range.start(),
        end_date: request.range.end(),
        frequency: request.strategy.swp_frequency,
        withdrawal: request.strategy.swp_amount,
        initial_value: round2(result.series.values.first().copied().unwrap_or_default()),
        initial_units: result.initial_units,
        final_units: result.final_units,
        final_value: result.series.last_value().map(round2),
        total_withdrawn: round2(result.total_withdrawn),
        withdrawals: result.withdrawals,
        chart: chart(result.series),
    }
}

fn strategies_response(
    request: &CalculatorRequest,
    comparison: StrategyComparison,
) -> StrategiesResponse {
    let round_series = |values: Vec<Option<f64>>| -> Vec<Option<f64>> {
        values.into_iter().map(|v| v.map(round2)).collect()
    };
    StrategiesResponse {
        start_date: request.range.start(),
        end_date: request.range.end(),
        labels: comparison.labels,
        sip: round_series(comparison.sip),
        lumpsum: round_series(comparison.lumpsum),
        swp: round_series(comparison.swp),
    }
}

fn chart(series: SimulationResult) -> ChartResponse {
    ChartResponse {
        labels: series.labels,
        values: series.values.into_iter().map(round2).collect(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn catalog_page(schemes: &[crate::data::SchemeSummary], query: CatalogQuery) -> CatalogPage {
    search_schemes(
        schemes,
        query.q.as_deref().unwrap_or_default(),
        query.page.unwrap_or(1),
        query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    )
}

fn returns_row(series: &NavSeries, period: ReturnPeriod) -> ReturnsRow {
    match trailing_return(series, period) {
        Ok(computed) => ReturnsRow::Computed(computed),
        Err(review) => ReturnsRow::NeedsReview {
            period,
            needs_review: true,
            reason: review.to_string(),
        },
    }
}

fn nav_window(code: &str, series: &NavSeries, query: &NavQuery) -> NavWindowResponse {
    let points = series.last_year();
    let navs: Vec<f64> = points.iter().map(|p| p.nav).collect();
    let window = match (query.ma, query.window) {
        (Some(false), _) | (None, None) => None,
        (_, window) => Some(window.unwrap_or(DEFAULT_MA_WINDOW).max(MIN_MA_WINDOW)),
    };

    NavWindowResponse {
        scheme_code: code.to_string(),
        labels: points.iter().map(|p| p.date).collect(),
        moving_average: window.map(|w| moving_average(&navs, w)),
        navs,
        window,
    }
}

fn compare_codes(query: CompareQuery) -> Result<Vec<String>, String> {
    let mut codes: Vec<String> = Vec::new();
    for code in query.codes.as_deref().unwrap_or_default().split(',') {
        let code = code.trim();
        if !code.is_empty() && !codes.iter().any(|seen| seen == code) {
            codes.push(code.to_string());
        }
    }

    if codes.is_empty() {
        return Err("codes must list at least one scheme code".to_string());
    }
    if codes.len() > MAX_COMPARE_SCHEMES {
        return Err(format!(
            "codes may list at most {MAX_COMPARE_SCHEMES} scheme codes"
        ));
    }
    Ok(codes)
}

/// Last-year NAVs of every scheme aligned on the first scheme's dates, plus
/// each scheme's risk/return point.
fn build_compare_response(schemes: &[Arc<CachedScheme>]) -> CompareResponse {
    let labels: Vec<NaiveDate> = schemes
        .first()
        .map(|first| first.series.last_year().iter().map(|p| p.date).collect())
        .unwrap_or_default();

    let schemes = schemes
        .iter()
        .map(|scheme| {
            let meta = &scheme.metadata;
            CompareScheme {
                scheme_code: meta.scheme_code.clone(),
                scheme_name: meta.scheme_name.clone(),
                fund_house: meta.fund_house.clone(),
                scheme_type: meta.scheme_type.clone(),
                scheme_category: meta.scheme_category.clone(),
                risk_return: risk_return(&lookback_navs(&scheme.series)),
                navs: labels
                    .iter()
                    .map(|date| scheme.series.nav_on(*date))
                    .collect(),
            }
        })
        .collect();

    CompareResponse { labels, schemes }
}

fn lookback_navs(series: &NavSeries) -> Vec<f64> {
    series
        .tail(RISK_RETURN_LOOKBACK)
        .iter()
        .map(|p| p.nav)
        .collect()
}
