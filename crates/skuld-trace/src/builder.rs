//! Worklist-driven trace construction.
//!
//! The builder symbolically executes a program: statements are consumed
//! from the front of a double-ended work queue, and every inlining or
//! unrolling step splices its expansion back onto the front. Scope and
//! condition markers travel inside the queue with the statements they
//! bracket, so LIFO nesting survives any amount of front-insertion.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use tracing::debug;

use skuld_ast::{
    CallStmt, CallableDef, Constants, Expression, Program, RegRef, Select, Stmt, StmtKind,
    default_constants, eval_f64, eval_i64, eval_u32, fold, substitute_stmt,
};

use crate::action::{Action, ActionKind};
use crate::error::{TraceError, TraceResult};
use crate::gates::BuiltinGate;
use crate::lineage::lineage_string;
use crate::trace::Trace;
use crate::wire::{Wire, WireKind};

/// Number of physical wires pre-registered before the program runs.
pub const DEFAULT_PHYSICAL_WIRES: u32 = 6;

/// Pending work: statements interleaved with scope and condition markers.
#[derive(Debug, Clone)]
enum WorkItem {
    Stmt(Stmt),
    PopScope,
    PushCondition(String),
    PopCondition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallableKind {
    Gate,
    Function,
}

/// A registered gate or function definition.
#[derive(Debug, Clone)]
struct Callable {
    kind: CallableKind,
    def: CallableDef,
}

/// How a call site dispatches.
enum Target {
    Builtin(BuiltinGate),
    UserGate(CallableDef),
    Function(CallableDef),
}

/// Builds a [`Trace`] by symbolically executing a program.
///
/// The builder owns all mutable state of one run: the work queue, the
/// wire timelines, the scope-frame stack, the condition stack and the
/// global constants. The returned trace is never mutated again.
pub struct TraceBuilder {
    queue: VecDeque<WorkItem>,
    trace: Trace,
    scopes: Vec<FxHashMap<String, String>>,
    conditions: Vec<String>,
    constants: Constants,
    callables: FxHashMap<String, Callable>,
    clock: u32,
}

impl Default for TraceBuilder {
    fn default() -> Self {
        Self::with_physical_wires(DEFAULT_PHYSICAL_WIRES)
    }
}

impl TraceBuilder {
    /// Builder with the default physical wire count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-registering `$0..$n` physical wires.
    pub fn with_physical_wires(n: u32) -> Self {
        let mut trace = Trace::new();
        for i in 0..n {
            trace.declare(format!("${i}"), Wire::physical());
        }
        Self {
            queue: VecDeque::new(),
            trace,
            scopes: vec![FxHashMap::default()],
            conditions: Vec::new(),
            constants: default_constants(),
            callables: FxHashMap::default(),
            clock: 0,
        }
    }

    /// Run the program to completion and return the finished trace.
    pub fn build(mut self, program: &Program) -> TraceResult<Trace> {
        for stmt in &program.statements {
            self.queue.push_back(WorkItem::Stmt(stmt.clone()));
        }
        while let Some(item) = self.queue.pop_front() {
            match item {
                WorkItem::PopScope => {
                    self.scopes.pop();
                }
                WorkItem::PushCondition(text) => self.conditions.push(text),
                WorkItem::PopCondition => {
                    self.conditions.pop();
                }
                WorkItem::Stmt(stmt) => self.dispatch(stmt)?,
            }
        }
        Ok(self.trace)
    }

    /// Next logical time.
    fn tick(&mut self) -> u32 {
        let t = self.clock;
        self.clock += 1;
        t
    }

    /// Insert items at the queue front, preserving their order.
    fn splice_front(&mut self, items: Vec<WorkItem>) {
        for item in items.into_iter().rev() {
            self.queue.push_front(item);
        }
    }

    /// Active guard texts, newest first, comma-joined.
    fn active_condition(&self) -> Option<String> {
        if self.conditions.is_empty() {
            None
        } else {
            let joined = self
                .conditions
                .iter()
                .rev()
                .cloned()
                .collect::<Vec<_>>()
                .join(",");
            Some(joined)
        }
    }

    /// Render a register reference with its index folded where possible.
    fn render_ref(&self, r: &RegRef) -> String {
        match &r.select {
            Select::All => r.register.clone(),
            Select::Index(e) => format!("{}[{}]", r.register, fold(e, &self.constants)),
            Select::Range(a, b) => format!(
                "{}[{}:{}]",
                r.register,
                fold(a, &self.constants),
                fold(b, &self.constants)
            ),
        }
    }

    /// Resolve a rendered name through the top scope frame; unmapped
    /// names fall through unchanged.
    fn resolve_name(&self, name: &str) -> String {
        self.scopes
            .last()
            .and_then(|frame| frame.get(name))
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    fn dispatch(&mut self, stmt: Stmt) -> TraceResult<()> {
        let line = stmt.line;
        match stmt.kind {
            StmtKind::ConstDecl { name, value } => {
                let v = eval_f64(&value, &self.constants)?;
                debug!(name = %name, value = v, "registered constant");
                self.constants.insert(name, v);
                Ok(())
            }

            StmtKind::QubitDecl { name, size } => {
                match size {
                    None => self.trace.declare(name, Wire::named()),
                    Some(e) => {
                        let n = eval_u32(&e, &self.constants)?;
                        for i in 0..n {
                            self.trace.declare(format!("{name}[{i}]"), Wire::array(i));
                        }
                    }
                }
                Ok(())
            }

            StmtKind::LetAlias { name, target } => self.bind_alias(&name, &target),

            StmtKind::GateDef(def) => {
                self.callables.insert(
                    def.name.clone(),
                    Callable {
                        kind: CallableKind::Gate,
                        def,
                    },
                );
                Ok(())
            }

            StmtKind::FnDef(def) => {
                self.callables.insert(
                    def.name.clone(),
                    Callable {
                        kind: CallableKind::Function,
                        def,
                    },
                );
                Ok(())
            }

            StmtKind::Call(call) => self.dispatch_call(line, call),

            StmtKind::MeasureAssign { store, target } => {
                self.measure_shorthand(line, store, &target)
            }

            StmtKind::Measure { source, store } => self.measure_explicit(line, &source, &store),

            StmtKind::Reset { target } => self.reset(line, &target),

            StmtKind::Barrier { targets } => self.barrier(line, &targets),

            StmtKind::If { condition, body } => {
                let mut items = vec![WorkItem::PushCondition(condition.to_string())];
                items.extend(body.into_iter().map(WorkItem::Stmt));
                items.push(WorkItem::PopCondition);
                self.splice_front(items);
                Ok(())
            }

            StmtKind::For {
                variable,
                range,
                body,
            } => {
                let start = eval_i64(&range.start, &self.constants)?;
                let stop = eval_i64(&range.end, &self.constants)?;
                let step = match &range.step {
                    Some(e) => eval_i64(e, &self.constants)?,
                    None => 1,
                };
                if step == 0 {
                    return Err(skuld_ast::EvalError::ZeroStep.into());
                }
                let mut values = Vec::new();
                let mut v = start;
                if step > 0 {
                    while v <= stop {
                        values.push(v);
                        v += step;
                    }
                } else {
                    while v >= stop {
                        values.push(v);
                        v += step;
                    }
                }
                debug!(variable = %variable, iterations = values.len(), "unrolling loop");
                let mut items = Vec::with_capacity(values.len() * body.len());
                for val in &values {
                    for stmt in &body {
                        items.push(WorkItem::Stmt(substitute_stmt(
                            stmt,
                            &variable,
                            *val,
                            &self.constants,
                        )));
                    }
                }
                self.splice_front(items);
                Ok(())
            }

            StmtKind::Box { body } => {
                self.splice_front(body.into_iter().map(WorkItem::Stmt).collect());
                Ok(())
            }
        }
    }

    /// Bind a `let` alias into the active scope frame.
    fn bind_alias(&mut self, name: &str, target: &RegRef) -> TraceResult<()> {
        let mut pairs: Vec<(String, String)> = Vec::new();
        match &target.select {
            Select::Index(e) => {
                let i = eval_u32(e, &self.constants)?;
                pairs.push((format!("{name}[0]"), format!("{}[{i}]", target.register)));
            }
            Select::Range(a, b) => {
                let start = eval_u32(a, &self.constants)?;
                let end = eval_u32(b, &self.constants)?;
                for (j, i) in (start..=end).enumerate() {
                    pairs.push((format!("{name}[{j}]"), format!("{}[{i}]", target.register)));
                }
            }
            Select::All => {
                if self.trace.contains(&target.register) {
                    pairs.push((name.to_string(), target.register.clone()));
                } else {
                    let elements = self.trace.elements(&target.register);
                    if elements.is_empty() {
                        return Err(TraceError::UndeclaredWire(target.register.clone()));
                    }
                    for (j, id) in elements.into_iter().enumerate() {
                        pairs.push((format!("{name}[{j}]"), id));
                    }
                }
            }
        }
        let frame = self.scopes.last_mut().expect("scope stack never empty");
        for (alias, actual) in pairs {
            frame.insert(alias, actual);
        }
        Ok(())
    }

    fn reset(&mut self, line: u32, target: &RegRef) -> TraceResult<()> {
        let base = self.resolve_name(&self.render_ref(target));
        let ids = self.trace.matching_ids(&base);
        if ids.is_empty() {
            return Err(TraceError::UndeclaredWire(base));
        }
        let t = self.tick();
        let condition = self.active_condition();
        for id in ids {
            let mut action = Action::new(t, line, ActionKind::Reset);
            action.condition = condition.clone();
            self.trace.record(&id, action)?;
        }
        Ok(())
    }

    fn barrier(&mut self, line: u32, targets: &[RegRef]) -> TraceResult<()> {
        let t = self.tick();
        let condition = self.active_condition();
        if targets.is_empty() {
            // A bare barrier touches every wire that has been used;
            // untouched physical wires stay out of it.
            let ids: Vec<String> = self
                .trace
                .iter()
                .filter(|(_, w)| !(w.kind == WireKind::Physical && w.actions.is_empty()))
                .map(|(id, _)| id.to_string())
                .collect();
            for id in ids {
                let mut action = Action::new(t, line, ActionKind::Barrier);
                action.condition = condition.clone();
                self.trace.record(&id, action)?;
            }
            return Ok(());
        }
        for target in targets {
            let base = self.resolve_name(&self.render_ref(target));
            let ids = if self.trace.contains(&base) {
                vec![base]
            } else {
                let elements = self.trace.elements(&base);
                if elements.is_empty() {
                    return Err(TraceError::UndeclaredWire(base));
                }
                elements
            };
            for id in ids {
                let mut action = Action::new(t, line, ActionKind::Barrier);
                action.condition = condition.clone();
                self.trace.record(&id, action)?;
            }
        }
        Ok(())
    }

    fn measure_shorthand(&mut self, line: u32, store: String, target: &RegRef) -> TraceResult<()> {
        let actual = self.resolve_name(&self.render_ref(target));
        let t = self.tick();
        let condition = self.active_condition();
        let ids = if self.trace.contains(&actual) {
            vec![actual]
        } else {
            let elements = self.trace.elements(&actual);
            if elements.is_empty() {
                return Err(TraceError::UndeclaredWire(actual));
            }
            elements
        };
        for id in ids {
            let mut action = Action::new(t, line, ActionKind::Measure);
            action.store = Some(store.clone());
            action.condition = condition.clone();
            self.trace.record(&id, action)?;
        }
        Ok(())
    }

    fn measure_explicit(&mut self, line: u32, source: &RegRef, store: &RegRef) -> TraceResult<()> {
        let t = self.tick();
        let condition = self.active_condition();
        match &source.select {
            Select::Range(a, b) => {
                let start = eval_u32(a, &self.constants)?;
                let end = eval_u32(b, &self.constants)?;
                if matches!(store.select, Select::Index(_)) {
                    return Err(TraceError::InvalidSlice(format!(
                        "destination '{store}' must be array-typed"
                    )));
                }
                for i in start..=end {
                    let id = format!("{}[{i}]", source.register);
                    if !self.trace.contains(&id) {
                        return Err(TraceError::UndeclaredWire(id));
                    }
                    let mut action = Action::new(t, line, ActionKind::Measure);
                    action.store = Some(format!("{}[{i}]", store.register));
                    action.condition = condition.clone();
                    self.trace.record(&id, action)?;
                }
                Ok(())
            }
            Select::Index(_) => {
                let id = self.render_ref(source);
                if !self.trace.contains(&id) {
                    return Err(TraceError::UndeclaredWire(id));
                }
                let mut action = Action::new(t, line, ActionKind::Measure);
                action.store = Some(self.render_ref(store));
                action.condition = condition.clone();
                self.trace.record(&id, action)?;
                Ok(())
            }
            Select::All => {
                if self.trace.contains(&source.register) {
                    let mut action = Action::new(t, line, ActionKind::Measure);
                    action.store = Some(self.render_ref(store));
                    action.condition = condition.clone();
                    self.trace.record(&source.register, action)?;
                    return Ok(());
                }
                let elements = self.trace.elements(&source.register);
                if elements.is_empty() {
                    return Err(TraceError::UndeclaredWire(source.register.clone()));
                }
                for (i, id) in elements.into_iter().enumerate() {
                    let mut action = Action::new(t, line, ActionKind::Measure);
                    action.store = Some(format!("{}[{i}]", store.register));
                    action.condition = condition.clone();
                    self.trace.record(&id, action)?;
                }
                Ok(())
            }
        }
    }

    fn dispatch_call(&mut self, line: u32, call: CallStmt) -> TraceResult<()> {
        if call.qargs.is_empty() {
            return Ok(());
        }

        // Render each argument, then resolve it through the top scope
        // frame; unmapped spellings fall through as literal wire names.
        let locals: Vec<String> = call.qargs.iter().map(|r| self.render_ref(r)).collect();
        let actuals: Vec<String> = locals.iter().map(|l| self.resolve_name(l)).collect();

        let target = if let Some(gate) = BuiltinGate::classify(&call.name) {
            Target::Builtin(gate)
        } else if let Some(callable) = self.callables.get(&call.name) {
            match callable.kind {
                CallableKind::Gate => Target::UserGate(callable.def.clone()),
                CallableKind::Function => Target::Function(callable.def.clone()),
            }
        } else {
            return Err(TraceError::UnresolvedCallable(call.name.clone()));
        };

        let target = match target {
            // Functions bind their formals (array formals element-wise)
            // and inline; wires referenced by the body are validated as
            // the body executes.
            Target::Function(def) => {
                return self.inline_callable(&call.name, &def, &actuals);
            }
            other => other,
        };

        // Gate path: validate wires and collect whole-array arguments.
        let mut arrays: Vec<(usize, String, u32)> = Vec::new();
        for (pos, actual) in actuals.iter().enumerate() {
            if self.trace.contains(actual) {
                continue;
            }
            match self.trace.array_size(actual) {
                Some(size) => {
                    if let Some((_, first, first_size)) = arrays.first() {
                        if *first_size != size {
                            return Err(TraceError::SizeMismatch {
                                first: first.clone(),
                                second: actual.clone(),
                            });
                        }
                    }
                    arrays.push((pos, actual.clone(), size));
                }
                None => return Err(TraceError::UndeclaredWire(actual.clone())),
            }
        }

        // Whole-array arguments broadcast: duplicate the call once per
        // index, substituting the indexed form, and requeue the
        // duplicates in place of the original.
        if !arrays.is_empty() {
            let size = arrays[0].2;
            debug!(gate = %call.name, size, "broadcasting array call");
            let mut items = Vec::with_capacity(size as usize);
            for i in 0..size {
                let mut dup = call.clone();
                for (pos, _, _) in &arrays {
                    dup.qargs[*pos].select = Select::Index(Expression::Int(i64::from(i)));
                }
                items.push(WorkItem::Stmt(Stmt::new(line, StmtKind::Call(dup))));
            }
            self.splice_front(items);
            return Ok(());
        }

        // Control modifiers consume leading arguments as controls, all
        // at the time the terminal gate will use.
        let mut cursor = 0usize;
        let mut shared_time = None;
        if !call.modifiers.is_empty() {
            let t = self.tick();
            shared_time = Some(t);
            let condition = self.active_condition();
            for modifier in &call.modifiers {
                match modifier.name.as_str() {
                    "ctrl" | "negctrl" => {
                        let n = match &modifier.count {
                            None => 1,
                            Some(e) => eval_u32(e, &self.constants).map_err(|_| {
                                TraceError::MalformedModifier(format!("{}({e})", modifier.name))
                            })?,
                        };
                        for _ in 0..n {
                            let Some(actual) = actuals.get(cursor) else {
                                return Err(TraceError::MalformedModifier(format!(
                                    "modifier on '{}' consumes more arguments than supplied",
                                    call.name
                                )));
                            };
                            cursor += 1;
                            let mut action = Action::new(t, line, ActionKind::Ctrl);
                            action.condition = condition.clone();
                            self.trace.record(actual, action)?;
                        }
                    }
                    // Unitary-shape modifiers do not affect wiring.
                    "inv" | "pow" => {}
                    other => return Err(TraceError::MalformedModifier(other.to_string())),
                }
            }
        }

        let locals = &locals[cursor..];
        let actuals = &actuals[cursor..];

        match target {
            Target::Builtin(gate) => {
                let t = match shared_time {
                    Some(t) => t,
                    None => self.tick(),
                };
                self.apply_builtin(gate, &call.name, t, line, actuals, locals)
            }
            Target::UserGate(def) => {
                if actuals.is_empty() {
                    return Ok(());
                }
                self.inline_callable(&call.name, &def, actuals)
            }
            Target::Function(_) => unreachable!("function calls return early"),
        }
    }

    /// Bind a definition's formals to the actuals and inline its body at
    /// the queue front, bracketed by a scope-pop marker.
    fn inline_callable(
        &mut self,
        name: &str,
        def: &CallableDef,
        actuals: &[String],
    ) -> TraceResult<()> {
        if def.params.len() != actuals.len() {
            return Err(TraceError::ArityMismatch {
                callable: name.to_string(),
                expected: def.params.len(),
                got: actuals.len(),
            });
        }
        // Lexical shadowing: the new frame is the current top plus the
        // formal bindings.
        let mut frame = self
            .scopes
            .last()
            .cloned()
            .expect("scope stack never empty");
        for (param, actual) in def.params.iter().zip(actuals) {
            match &param.size {
                Some(size) => {
                    let n = eval_u32(size, &self.constants)?;
                    for j in 0..n {
                        frame.insert(format!("{}[{j}]", param.name), format!("{actual}[{j}]"));
                    }
                }
                None => {
                    frame.insert(param.name.clone(), actual.clone());
                }
            }
        }
        self.scopes.push(frame);
        let mut items: Vec<WorkItem> = def.body.iter().cloned().map(WorkItem::Stmt).collect();
        items.push(WorkItem::PopScope);
        self.splice_front(items);
        debug!(callable = %name, "inlined callable body");
        Ok(())
    }

    /// Emit the action pattern of a built-in gate.
    ///
    /// Lineage is resolved immediately before each terminal action is
    /// recorded, so within one application an action sees exactly the
    /// controls recorded ahead of it.
    fn apply_builtin(
        &mut self,
        gate: BuiltinGate,
        name: &str,
        t: u32,
        line: u32,
        actuals: &[String],
        locals: &[String],
    ) -> TraceResult<()> {
        if actuals.len() < gate.arity() {
            return Err(TraceError::GateArity {
                gate: name.to_string(),
                expected: gate.arity(),
                got: actuals.len(),
            });
        }
        let condition = self.active_condition();
        match gate {
            BuiltinGate::Unitary => {
                let mut action = Action::new(t, line, ActionKind::GateCall);
                action.gate = Some(name.to_string());
                action.lineage = Some(lineage_string(&self.trace, t));
                action.local = Some(locals[0].clone());
                action.condition = condition;
                self.trace.record(&actuals[0], action)?;
            }

            BuiltinGate::Controlled => {
                let mut ctrl = Action::new(t, line, ActionKind::Ctrl);
                ctrl.local = Some(locals[0].clone());
                self.trace.record(&actuals[0], ctrl)?;

                let mut action = Action::new(t, line, ActionKind::CtrlGateCall);
                action.gate = Some(name.to_string());
                action.lineage = Some(lineage_string(&self.trace, t));
                action.local = Some(locals[1].clone());
                action.condition = condition;
                self.trace.record(&actuals[1], action)?;
            }

            BuiltinGate::Swap => {
                for (i, j) in [(0usize, 1usize), (1, 0)] {
                    let mut action = Action::new(t, line, ActionKind::GateCall);
                    action.gate = Some(name.to_string());
                    action.partner = Some(actuals[j].clone());
                    action.lineage = Some(lineage_string(&self.trace, t));
                    action.local = Some(locals[i].clone());
                    action.condition = condition.clone();
                    self.trace.record(&actuals[i], action)?;
                }
            }

            BuiltinGate::Ccx => {
                for i in 0..2 {
                    let mut ctrl = Action::new(t, line, ActionKind::Ctrl);
                    ctrl.local = Some(locals[i].clone());
                    self.trace.record(&actuals[i], ctrl)?;
                }
                let mut action = Action::new(t, line, ActionKind::CtrlGateCall);
                action.gate = Some(name.to_string());
                action.lineage = Some(lineage_string(&self.trace, t));
                action.local = Some(locals[2].clone());
                action.condition = condition;
                self.trace.record(&actuals[2], action)?;
            }

            BuiltinGate::Cswap => {
                let mut ctrl = Action::new(t, line, ActionKind::Ctrl);
                ctrl.local = Some(locals[0].clone());
                self.trace.record(&actuals[0], ctrl)?;

                for (i, j) in [(1usize, 2usize), (2, 1)] {
                    let mut action = Action::new(t, line, ActionKind::CtrlGateCall);
                    action.gate = Some(name.to_string());
                    action.partner = Some(actuals[j].clone());
                    action.lineage = Some(lineage_string(&self.trace, t));
                    action.local = Some(locals[i].clone());
                    action.condition = condition.clone();
                    self.trace.record(&actuals[i], action)?;
                }
            }
        }
        Ok(())
    }
}

/// Build a trace with the default builder configuration.
pub fn build_trace(program: &Program) -> TraceResult<Trace> {
    TraceBuilder::new().build(program)
}
