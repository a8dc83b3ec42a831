//! Message forwarding across a three-node network.
//!
//! Each node holds a forwarding table mapping a destination to
//! `(next_hop, travel_time)`. Receiving a message either delivers it or
//! schedules its arrival at the next hop. Nodes live in a shared
//! `Rc<RefCell<..>>` captured by every action, since actions run one at
//! a time on a single thread.
//!
//! The second run addresses a node no table knows about; the resulting
//! [`ForwardError::NoRoute`] escapes `run()` unchanged.
//!
//! Run with:
//!   RUST_LOG=evsim_engine=trace cargo run --example forwarding

use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::rc::Rc;

use evsim_core::{ConfigError, SimError};
use evsim_engine::{RunMetrics, Simulator, SimulatorConfig};
use tracing_subscriber::EnvFilter;

type NodeId = usize;

#[derive(Clone, Debug)]
struct Message {
    dst: NodeId,
    content: String,
}

struct Node {
    id: NodeId,
    forward_table: HashMap<NodeId, (NodeId, i64)>,
    forwarded: u32,
}

type Network = Rc<RefCell<Vec<Node>>>;
type NetSim = Simulator<ForwardError>;

// ── Errors ─────────────────────────────────────────────────────────

/// Failures raised while a message is in flight.
#[derive(Debug, PartialEq)]
enum ForwardError {
    /// The simulator configuration was rejected.
    Config(ConfigError),
    /// A simulator call made from inside an action failed.
    Sim(SimError),
    /// A message arrived at a node id outside the network.
    UnknownNode { node: NodeId },
    /// The node's forwarding table has no entry for the destination.
    NoRoute { node: NodeId, dst: NodeId },
}

impl fmt::Display for ForwardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Sim(e) => write!(f, "simulator: {e}"),
            Self::UnknownNode { node } => write!(f, "no node with id {node}"),
            Self::NoRoute { node, dst } => write!(f, "node {node} has no route to {dst}"),
        }
    }
}

impl Error for ForwardError {}

impl From<SimError> for ForwardError {
    fn from(e: SimError) -> Self {
        Self::Sim(e)
    }
}

// ── Model ──────────────────────────────────────────────────────────

/// Deliver `message` to `node`, or forward it one hop closer.
fn receive(
    network: Network,
    node: NodeId,
    message: Message,
    sim: &mut NetSim,
) -> Result<(), ForwardError> {
    if message.dst == node {
        println!("{}: node {node} received '{}'", sim.now(), message.content);
        return Ok(());
    }
    let (next_hop, travel) = {
        let mut nodes = network.borrow_mut();
        let me = nodes
            .get_mut(node)
            .ok_or(ForwardError::UnknownNode { node })?;
        let route = *me.forward_table.get(&message.dst).ok_or(ForwardError::NoRoute {
            node,
            dst: message.dst,
        })?;
        me.forwarded += 1;
        route
    };
    println!(
        "{}: node {node} forwards message for {} to node {next_hop}",
        sim.now(),
        message.dst
    );
    sim.schedule(travel, move |s: &mut NetSim| {
        receive(network, next_hop, message, s)
    })?;
    Ok(())
}

fn build_network() -> Network {
    Rc::new(RefCell::new(vec![
        Node {
            id: 0,
            forward_table: HashMap::from([(1, (1, 204)), (2, (2, 222_867))]),
            forwarded: 0,
        },
        Node {
            id: 1,
            forward_table: HashMap::from([(0, (0, 204)), (2, (0, 204))]),
            forwarded: 0,
        },
        Node {
            id: 2,
            forward_table: HashMap::from([(0, (0, 222_867)), (1, (0, 222_867))]),
            forwarded: 0,
        },
    ]))
}

/// Inject `message` at node `from` after 100 ticks and run to completion.
fn send(
    network: &Network,
    from: NodeId,
    message: Message,
) -> Result<(NetSim, RunMetrics), ForwardError> {
    let config = SimulatorConfig::named("forwarding");
    let mut sim = NetSim::with_config(config).map_err(ForwardError::Config)?;
    sim.ready()?;
    let net = Rc::clone(network);
    sim.schedule(100, move |s: &mut NetSim| receive(net, from, message, s))?;
    let metrics = sim.run()?;
    Ok((sim, metrics))
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let network = build_network();
    let message = Message {
        dst: 2,
        content: "Hello world!".to_string(),
    };
    let (mut sim, metrics) = send(&network, 1, message)?;
    sim.reset()?;

    println!("delivered after {} events", metrics.events_executed);
    for node in network.borrow().iter() {
        println!("node {} forward counter: {}", node.id, node.forwarded);
    }

    let lost = Message {
        dst: 7,
        content: "Anyone there?".to_string(),
    };
    match send(&network, 0, lost) {
        Ok(_) => println!("unexpected delivery"),
        Err(e) => println!("second run aborted: {e}"),
    }
    Ok(())
}
