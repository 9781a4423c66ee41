/*!

This is the long-form manual for `electoral_tally` and `elecmap`.

## Counting rules

A contest is made of regions, each worth a fixed number of electors, and of
candidates, each listing the regions they won. A region is won as a whole.

* The total of a candidate is the sum of the electors of the regions they won.
* The percentage of a candidate is their total divided by the sum of the
  totals of all the candidates. Regions won by nobody are left out of this
  sum, so the percentages always add up to 100 as long as at least one
  elector is claimed. When nobody claims any elector, every percentage is 0.
* The majority threshold is half of all the electors (claimed or not),
  rounded down, plus one: 270 for 538 electors. The threshold percentage,
  the needle of the results bar, is this threshold divided by all the electors.
* The winner is the candidate whose total reaches the majority threshold.
  There may be none.

## Overlapping claims

Two candidates should never list the same region. What happens when they do
is controlled by the overlap policy:

* `reject` (default): the configuration is refused and the error names the
  region and both candidates.
* `firstListed`: the region goes to the candidate that comes first in the
  `candidates` list. The later claims are ignored (with a warning) and do not
  count toward any total.

A candidate listing the same region twice is not an overlap: the region is
counted once.

## Configuration

`elecmap` reads a JSON file:

```text
{
  "outputSettings": {
    "contestName": "2036 Presidential Election",
    "outputPath": "election_map.json",
    "neutralColor": "gray",
    "photoUrls": { "bluecat.jpg": "https://example.org/bluecat.jpg" }
  },
  "regions": [ { "name": "Alabama", "electors": 9 }, ... ],
  "candidates": [
    {
      "name": "Biden",
      "displayName": "Olivia Fei",
      "party": "Independent",
      "color": "blue",
      "photo": "bluecat.jpg",
      "regions": ["California", "New York", ...]
    },
    ...
  ],
  "rules": { "overlapPolicy": "reject" }
}
```

Only `contestName`, `regions` and `candidates` (with `name` and `regions`) are
mandatory.

- `outputPath` is relative to the directory of the configuration file. The
  `--out` flag overrides it and accepts `stdout`. Without either, the summary
  is printed to the standard output.
- `neutralColor` is the color of the regions won by nobody (default `gray`).
- `photoUrls` maps photo references to the URL written in the summary.
- A candidate without a `color` gets one from the palette `blue`, `red`,
  `green`, `orange`, `purple`, `brown`, by position.
- The regions won by nobody show the photo of the first candidate.

## Map summary

The output is a JSON document meant for a map renderer: for each region,
the winner, the color token and a label (`"Ohio (18)"`); for each candidate,
the total and the percentage; and the threshold for the needle. Counts are
written as strings and percentages with two decimals.

```bash
elecmap --config data/us_2036_config.json --out election_map.json
```

Passing `--reference expected.json` compares the summary with a saved one and
fails with a diff if they differ.

 */
