/*!

This is the long-form manual for `tournament_rules` and `tourney`.

## Margins

For two candidates `x` and `y`, the support of `x` over `y` is the number of
voters ranking `x` above `y`. The margin of `x` over `y` is the support of `x`
over `y` minus the support of `y` over `x`. `x` is majority preferred to `y`
when this margin is positive. The margin graph has an edge `x -> y`, weighted
by the margin, for every majority preference.

A Condorcet winner is majority preferred to every other candidate; a Condorcet
loser has every other candidate majority preferred to it. A majority winner is
ranked first by more than half of the voters.

## Scoring rules

| rule      | score of a candidate                                   | winners  |
|-----------|--------------------------------------------------------|----------|
| Plurality | number of voters ranking it first                      | highest  |
| Borda     | `n - 1` points for a first place, down to 0 for last    | highest  |
| Copeland  | majority wins minus majority losses                    | highest  |
| Minimax   | largest margin of another candidate over it, 0 if none | lowest   |

Ties are never broken: all the candidates sharing the best score win.

## Elimination rules

Instant runoff removes, at each round, all the candidates with the fewest
first-place votes. Coombs removes all the candidates with the most last-place
votes. Both stop as soon as a remaining candidate is ranked first by a strict
majority of the voters, only counting the remaining candidates. When a round
would remove every remaining candidate, they all win.

Plurality with runoff elects the majority winner if there is one. Otherwise the
candidates with the most first-place votes face the candidates with the second
most votes in head-to-head runoffs (or each other, if several share the most
votes). Every runoff winner wins, and a tied runoff elects both candidates.

None of these rules always elects the Condorcet winner: in
`illustrative_ex1`, candidate 2 is the Condorcet winner but instant runoff
elects candidate 1.

## Split Cycle

A majority cycle is a sequence of at least 3 candidates in which each
candidate is majority preferred to the next one, and the last one to the first.
In each majority cycle, the edges with the smallest margin are discarded (all
of them in case of a tie). The remaining edges of the margin graph are the
defeats, and the undefeated candidates are the winners.

Equivalently, `x` defeats `y` when the margin of `x` over `y` is larger than
the strength of every majority path from `y` back to `x`. This second
formulation does not enumerate cycles and is available as
`split_cycle_by_paths`.

Enumerating cycles is exponential in the number of candidates. It is bounded
by `SearchLimits`: a maximum number of candidates and a maximum number of
search steps. Exceeding a limit is reported as `ResourceExhausted`.

## Input formats

### JSON

```text
{
  "title": "Illustrative Example 1",
  "candidates": ["a", "b", "c", "d"],
  "ballots": [
    {"ranking": ["a", "b", "c", "d"], "count": 3},
    {"ranking": [1, 3, 2, 0], "count": 7}
  ],
  "limits": {"maxCandidates": 10, "maxSearchSteps": 1000000}
}
```

Rankings may use candidate names or indices. `candidates` is optional: without
it, the number of candidates is the length of the first ranking, and the
candidates are named `a`, `b`, `c`, ...

### csv

Each row is a ballot: the count, then the candidates from most to least
preferred. Candidates are numbered by order of first appearance.

```text
count,choice 1,choice 2,choice 3
3,Alice,Bob,Charlie
2,Bob,Charlie,Alice
```

The header row is skipped with `--skip-rows 1`.

## Graphs

`tourney --graph dot` prints the margin graph, each majority cycle and the
Split Cycle defeats as Graphviz digraphs using the `circo` layout.
`--graph text` prints the same graphs as lists of `from,to,weight` edges.
When the summary is printed to stdout, the graphs are printed to stderr.

 */
