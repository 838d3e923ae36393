//! Declarations of every node in the VRP request format.
//!
//! Nodes are built leaves first so each parent can hold its children by
//! reference. Every node built here is also recorded by name for lookup.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::json;
use vrp_params_core::{
    AllowedValues, Coercer, FieldSpec, RawKind, SchemaError, SchemaNode,
};

/// Supported first-solution heuristics for `preprocessing.first_solution_strategy`.
pub const FIRST_SOLUTION_STRATEGIES: &[&str] = &[
    "self_selection",
    "path_cheapest_arc",
    "global_cheapest_arc",
    "savings",
    "parallel_cheapest_insertion",
    "local_cheapest_insertion",
    "first_unbound",
    "christofides",
];

/// Supported clustering methods for `partition.method`.
pub const PARTITION_METHODS: &[&str] = &["hierarchical_tree", "balanced_kmeans"];

/// Entities a partition can split on.
pub const PARTITION_ENTITIES: &[&str] = &["vehicle", "work_day"];

/// Dimensions a vehicle can route on.
pub const ROUTER_DIMENSIONS: &[&str] = &["time", "distance"];

const TIME: &[RawKind] = &[RawKind::String, RawKind::Float, RawKind::Integer];

const OPEN_SYMBOL: Coercer = Coercer::Symbol(&[]);

pub(crate) type Nodes = BTreeMap<&'static str, Arc<SchemaNode>>;

/// Collects built nodes by name while the tree is assembled.
#[derive(Debug, Default)]
pub(crate) struct NodeSet {
    nodes: Nodes,
}

impl NodeSet {
    fn keep(&mut self, node: Arc<SchemaNode>) -> Arc<SchemaNode> {
        self.nodes.insert(node.name(), Arc::clone(&node));
        node
    }

    /// Build the whole tree and return its root along with every node.
    pub(crate) fn assemble() -> Result<(Arc<SchemaNode>, Nodes), SchemaError> {
        let mut set = Self::default();

        let timewindow = set.keep(timewindow()?);
        let indice_range = set.keep(indice_range()?);
        let location = set.keep(location()?);
        let point = set.keep(point(location)?);
        let unit = set.keep(unit()?);
        let activity = set.keep(activity(Arc::clone(&timewindow))?);
        let quantity = set.keep(quantity()?);
        let capacity = set.keep(capacity()?);
        let vehicle = set.keep(vehicle(capacity, timewindow)?);
        let service = set.keep(service(activity, quantity)?);
        let partition = set.keep(partition()?);
        let preprocessing = set.keep(preprocessing(partition)?);
        let resolution = set.keep(resolution()?);
        let restitution = set.keep(restitution()?);
        let schedule = set.keep(schedule(indice_range)?);
        let configuration = set.keep(configuration(
            preprocessing,
            resolution,
            restitution,
            schedule,
        )?);
        let vrp = set.keep(vrp(point, unit, vehicle, service, configuration)?);
        let root = set.keep(
            SchemaNode::builder("request")
                .field(FieldSpec::optional("vrp").object(vrp))
                .build()?,
        );
        Ok((root, set.nodes))
    }
}

fn id() -> FieldSpec {
    FieldSpec::required("id").kind(RawKind::String).non_blank()
}

fn string(name: &'static str) -> FieldSpec {
    FieldSpec::optional(name).kind(RawKind::String)
}

fn integer(name: &'static str) -> FieldSpec {
    FieldSpec::optional(name).kind(RawKind::Integer)
}

fn float(name: &'static str) -> FieldSpec {
    FieldSpec::optional(name).kind(RawKind::Float)
}

fn boolean(name: &'static str) -> FieldSpec {
    FieldSpec::optional(name).kind(RawKind::Boolean)
}

fn symbol(name: &'static str) -> FieldSpec {
    FieldSpec::optional(name)
        .kind(RawKind::Symbol)
        .coerce(OPEN_SYMBOL)
}

fn time(name: &'static str, coercer: Coercer) -> FieldSpec {
    FieldSpec::optional(name).kinds(TIME).coerce(coercer)
}

fn timewindow() -> Result<Arc<SchemaNode>, SchemaError> {
    SchemaNode::builder("timewindow")
        .field(string("id"))
        .field(time("start", Coercer::OptionalDuration))
        .field(time("end", Coercer::OptionalDuration))
        .field(integer("day_index").allowed(AllowedValues::IntRange { min: 0, max: 6 }))
        .at_least_one_of(&["start", "end", "day_index"])
        .build()
}

fn indice_range() -> Result<Arc<SchemaNode>, SchemaError> {
    SchemaNode::builder("indice_range")
        .field(integer("start"))
        .field(integer("end"))
        .build()
}

fn location() -> Result<Arc<SchemaNode>, SchemaError> {
    SchemaNode::builder("location")
        .field(FieldSpec::required("lat").kind(RawKind::Float).non_blank())
        .field(FieldSpec::required("lon").kind(RawKind::Float).non_blank())
        .build()
}

fn point(location: Arc<SchemaNode>) -> Result<Arc<SchemaNode>, SchemaError> {
    SchemaNode::builder("point")
        .field(id())
        .field(FieldSpec::optional("location").object(location).non_blank())
        .build()
}

fn unit() -> Result<Arc<SchemaNode>, SchemaError> {
    SchemaNode::builder("unit")
        .field(id())
        .field(string("label"))
        .field(boolean("counting"))
        .build()
}

fn activity(timewindow: Arc<SchemaNode>) -> Result<Arc<SchemaNode>, SchemaError> {
    SchemaNode::builder("activity")
        .field(time("duration", Coercer::Duration))
        .field(integer("additional_value"))
        .field(time("setup_duration", Coercer::Duration))
        .field(float("late_multiplier"))
        .field(integer("timewindow_start_day_shift_number").hidden())
        .field(
            FieldSpec::required("point_id")
                .kind(RawKind::String)
                .non_blank(),
        )
        .field(FieldSpec::optional("timewindows").array_of(timewindow))
        .build()
}

fn quantity() -> Result<Arc<SchemaNode>, SchemaError> {
    SchemaNode::builder("quantity")
        .field(string("id"))
        .field(FieldSpec::required("unit_id").kind(RawKind::String).non_blank())
        .field(float("value"))
        .build()
}

fn capacity() -> Result<Arc<SchemaNode>, SchemaError> {
    SchemaNode::builder("capacity")
        .field(string("id"))
        .field(FieldSpec::required("unit_id").kind(RawKind::String).non_blank())
        .field(FieldSpec::required("limit").kind(RawKind::Float).non_blank())
        .field(float("initial"))
        .field(float("overload_multiplier"))
        .build()
}

fn vehicle(
    capacity: Arc<SchemaNode>,
    timewindow: Arc<SchemaNode>,
) -> Result<Arc<SchemaNode>, SchemaError> {
    SchemaNode::builder("vehicle")
        .field(id())
        .field(float("cost_fixed"))
        .field(float("cost_distance_multiplier"))
        .field(float("cost_time_multiplier"))
        .field(string("router_dimension").allowed(AllowedValues::OneOf(ROUTER_DIMENSIONS)))
        .field(FieldSpec::optional("skills").array_of_arrays(RawKind::String))
        .field(FieldSpec::optional("unavailable_work_day_indices").array_of_scalar(RawKind::Integer))
        .field(boolean("free_approach"))
        .field(boolean("free_return"))
        .field(string("start_point_id"))
        .field(string("end_point_id"))
        .field(FieldSpec::optional("capacities").array_of(capacity))
        .field(FieldSpec::optional("sequence_timewindows").array_of(timewindow))
        .build()
}

fn service(
    activity: Arc<SchemaNode>,
    quantity: Arc<SchemaNode>,
) -> Result<Arc<SchemaNode>, SchemaError> {
    SchemaNode::builder("service")
        .field(id())
        .field(integer("priority").allowed(AllowedValues::IntRange { min: 0, max: 8 }))
        .field(integer("exclusion_cost"))
        .field(
            FieldSpec::optional("visits_number")
                .kinds(&[RawKind::Integer, RawKind::Float, RawKind::String])
                .coerce(Coercer::PositiveCount)
                .default_value(json!(1))
                .non_blank(),
        )
        .field(FieldSpec::optional("unavailable_visit_indices").array_of_scalar(RawKind::Integer))
        .field(
            FieldSpec::optional("unavailable_visit_day_indices")
                .array_of_scalar(RawKind::Integer),
        )
        .field(float("minimum_lapse"))
        .field(float("maximum_lapse"))
        .field(FieldSpec::optional("sticky_vehicle_ids").array_of_scalar(RawKind::String))
        .field(FieldSpec::optional("skills").array_of_scalar(RawKind::String))
        .field(symbol("type"))
        .field(FieldSpec::optional("activity").object(activity))
        .field(FieldSpec::optional("quantities").array_of(quantity))
        .build()
}

fn partition() -> Result<Arc<SchemaNode>, SchemaError> {
    SchemaNode::builder("partition")
        .field(
            FieldSpec::required("method")
                .kind(RawKind::String)
                .allowed(AllowedValues::OneOf(PARTITION_METHODS)),
        )
        .field(symbol("metric"))
        .field(
            FieldSpec::optional("entity")
                .kind(RawKind::Symbol)
                .coerce(Coercer::Symbol(PARTITION_ENTITIES)),
        )
        .field(integer("threshold"))
        .build()
}

fn preprocessing(partition: Arc<SchemaNode>) -> Result<Arc<SchemaNode>, SchemaError> {
    SchemaNode::builder("preprocessing")
        .field(integer("max_split_size"))
        .field(string("partition_method").hidden())
        .field(symbol("partition_metric").hidden())
        .field(FieldSpec::optional("kmeans_centroids").array_of_scalar(RawKind::Integer))
        .field(float("cluster_threshold"))
        .field(boolean("force_cluster"))
        .field(boolean("prefer_short_segment"))
        .field(integer("neighbourhood_size"))
        .field(FieldSpec::optional("partitions").array_of(partition))
        .field(
            FieldSpec::optional("first_solution_strategy")
                .array_of_scalar(RawKind::String)
                .coerce(Coercer::EnumList(FIRST_SOLUTION_STRATEGIES)),
        )
        .build()
}

fn resolution() -> Result<Arc<SchemaNode>, SchemaError> {
    SchemaNode::builder("resolution")
        .field(integer("duration").non_blank())
        .field(integer("iterations").non_blank())
        .field(integer("iterations_without_improvement").non_blank())
        .field(integer("stable_iterations").non_blank())
        .field(float("stable_coefficient").non_blank())
        .field(integer("initial_time_out").non_blank().hidden())
        .field(integer("minimum_duration").non_blank())
        .field(integer("time_out_multiplier"))
        .field(integer("vehicle_limit"))
        .field(integer("solver_parameter").hidden())
        .field(boolean("solver").default_value(json!(true)))
        .field(boolean("same_point_day"))
        .field(boolean("allow_partial_assignment").default_value(json!(true)))
        .field(integer("split_number"))
        .field(boolean("evaluate_only"))
        .field(integer("several_solutions").non_blank().default_value(json!(1)))
        .field(boolean("batch_heuristic").default_value(json!(false)))
        .field(integer("variation_ratio"))
        .field(integer("repetition").hidden())
        .at_least_one_of(&[
            "duration",
            "iterations",
            "iterations_without_improvement",
            "stable_iterations",
            "stable_coefficient",
            "initial_time_out",
            "minimum_duration",
        ])
        .mutually_exclusive(&["initial_time_out", "minimum_duration"])
        .build()
}

fn restitution() -> Result<Arc<SchemaNode>, SchemaError> {
    SchemaNode::builder("restitution")
        .field(boolean("geometry"))
        .field(boolean("geometry_polyline"))
        .field(boolean("intermediate_solutions"))
        .field(boolean("csv"))
        .field(boolean("allow_empty_result"))
        .build()
}

fn schedule(indice_range: Arc<SchemaNode>) -> Result<Arc<SchemaNode>, SchemaError> {
    SchemaNode::builder("schedule")
        .field(FieldSpec::optional("range_indices").object(indice_range))
        .field(FieldSpec::optional("unavailable_indices").array_of_scalar(RawKind::Integer))
        .build()
}

fn configuration(
    preprocessing: Arc<SchemaNode>,
    resolution: Arc<SchemaNode>,
    restitution: Arc<SchemaNode>,
    schedule: Arc<SchemaNode>,
) -> Result<Arc<SchemaNode>, SchemaError> {
    SchemaNode::builder("configuration")
        .field(FieldSpec::optional("preprocessing").object(preprocessing))
        .field(FieldSpec::optional("resolution").object(resolution))
        .field(FieldSpec::optional("restitution").object(restitution))
        .field(FieldSpec::optional("schedule").object(schedule))
        .build()
}

fn vrp(
    point: Arc<SchemaNode>,
    unit: Arc<SchemaNode>,
    vehicle: Arc<SchemaNode>,
    service: Arc<SchemaNode>,
    configuration: Arc<SchemaNode>,
) -> Result<Arc<SchemaNode>, SchemaError> {
    SchemaNode::builder("vrp")
        .field(string("name"))
        .field(FieldSpec::optional("points").array_of(point))
        .field(FieldSpec::optional("units").array_of(unit))
        .field(FieldSpec::required("vehicles").array_of(vehicle))
        .field(FieldSpec::optional("services").array_of(service).non_blank())
        .field(FieldSpec::optional("configuration").object(configuration))
        .build()
}
